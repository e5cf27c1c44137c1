use super::ExtractionError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Text of every top-level shape, slide by slide, in presentation order.
///
/// Paragraphs within a shape are joined by a newline and each shape is
/// terminated by one, so a two-paragraph title becomes `"Title\nSubtitle\n"`.
/// Shapes without a text body yield an empty line; group shapes are skipped.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Presentation(e.to_string()))?;

    let slides = match presentation_order(&mut archive)? {
        Some(slides) => slides,
        None => {
            tracing::debug!("No {} in archive, ordering slides by part name", PRESENTATION_PART);
            numbered_slides(&archive)
        }
    };

    let mut content = String::new();
    for slide_name in slides {
        let xml = read_part(&mut archive, &slide_name)?.ok_or_else(|| {
            ExtractionError::Presentation(format!("missing slide part {}", slide_name))
        })?;

        for shape in shape_texts(&xml)? {
            content.push_str(&shape);
            content.push('\n');
        }
    }

    Ok(content)
}

/// Slide parts listed in `<p:sldIdLst>`, resolved through the presentation
/// relationships. `None` when the archive has no presentation part.
fn presentation_order(archive: &mut Archive<'_>) -> Result<Option<Vec<String>>, ExtractionError> {
    let Some(presentation) = read_part(archive, PRESENTATION_PART)? else {
        return Ok(None);
    };
    let relationships = read_part(archive, PRESENTATION_RELS)?.unwrap_or_default();
    let targets = relationship_targets(&relationships)?;

    let mut slides = Vec::new();
    for id in slide_ids(&presentation)? {
        match targets.get(&id) {
            Some(target) => slides.push(target.clone()),
            None => tracing::debug!("Slide relationship {} has no target", id),
        }
    }

    Ok(Some(slides))
}

/// Fallback order: `ppt/slides/slideN.xml` parts sorted by N.
fn numbered_slides(archive: &Archive<'_>) -> Vec<String> {
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
        .collect();
    slides.sort();
    slides.into_iter().map(|(_, name)| name).collect()
}

fn read_part(archive: &mut Archive<'_>, name: &str) -> Result<Option<String>, ExtractionError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(ExtractionError::Presentation(format!("{}: {}", name, e))),
    };

    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Presentation(format!("{}: {}", name, e)))?;
    Ok(Some(xml))
}

/// `r:id` of every `<p:sldId>`, in document order.
fn slide_ids(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldId" => {
                if let Some(id) = attribute(&e, b"id", true)? {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Presentation(e.to_string())),
            _ => {}
        }
    }

    Ok(ids)
}

/// Relationship id -> archive path of its target.
fn relationship_targets(xml: &str) -> Result<HashMap<String, String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) =
                    (attribute(&e, b"Id", false)?, attribute(&e, b"Target", false)?)
                {
                    targets.insert(id, resolve_target(&target));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Presentation(e.to_string())),
            _ => {}
        }
    }

    Ok(targets)
}

fn attribute(
    element: &BytesStart<'_>,
    name: &[u8],
    prefixed: bool,
) -> Result<Option<String>, ExtractionError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| ExtractionError::Presentation(e.to_string()))?;
        if attr.key.local_name().as_ref() == name && attr.key.prefix().is_some() == prefixed {
            let value = attr
                .unescape_value()
                .map_err(|e| ExtractionError::Presentation(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Resolve a relationship target of the presentation part to an archive path.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments = vec!["ppt"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// `ppt/slides/slide12.xml` -> 12. Relationship parts and other entries are ignored.
fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix(SLIDE_PREFIX)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

fn shape_texts(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut shapes = Vec::new();
    let mut group_depth = 0usize;
    let mut in_shape = false;
    let mut paragraphs: Vec<String> = Vec::new();
    let mut paragraph: Option<String> = None;
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"grpSp" => group_depth += 1,
                b"sp" if group_depth == 0 => {
                    in_shape = true;
                    paragraphs.clear();
                }
                b"p" if in_shape => paragraph = Some(String::new()),
                b"br" => {
                    if let Some(current) = paragraph.as_mut() {
                        current.push('\n');
                    }
                }
                b"t" if paragraph.is_some() => in_run_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"sp" if group_depth == 0 => shapes.push(String::new()),
                b"br" => {
                    if let Some(current) = paragraph.as_mut() {
                        current.push('\n');
                    }
                }
                b"p" if in_shape => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(e)) if in_run_text => {
                if let Some(current) = paragraph.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| ExtractionError::Presentation(e.to_string()))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"grpSp" => group_depth = group_depth.saturating_sub(1),
                b"t" => in_run_text = false,
                b"p" => {
                    if let Some(current) = paragraph.take() {
                        paragraphs.push(current);
                    }
                }
                b"sp" if in_shape => {
                    shapes.push(paragraphs.join("\n"));
                    in_shape = false;
                    paragraphs.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Presentation(e.to_string())),
            _ => {}
        }
    }

    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_shapes_in_slide_order() {
        let bytes = fixtures::pptx(&[
            vec![vec!["Quarterly Review", "Engineering"]],
            vec![vec!["Hiring plan"], vec!["Two &amp; three"]],
        ]);
        let text = extract(&bytes).unwrap();

        assert_eq!(
            text,
            "Quarterly Review\nEngineering\nHiring plan\nTwo & three\n"
        );
    }

    #[test]
    fn test_reordered_deck_follows_presentation_order() {
        // slide1.xml was moved behind slide2.xml in the editor
        let bytes = fixtures::pptx_reordered(
            &[vec![vec!["Shown second"]], vec![vec!["Shown first"]]],
            &[1, 0],
        );
        let text = extract(&bytes).unwrap();

        assert_eq!(text, "Shown first\nShown second\n");
    }

    #[test]
    fn test_parts_without_presentation_sort_numerically() {
        let slides: Vec<Vec<Vec<String>>> = (1..=11)
            .map(|i| vec![vec![format!("Slide {}", i)]])
            .collect();
        let bytes = fixtures::pptx_parts_only(&slides);
        let text = extract(&bytes).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Slide 2");
        assert_eq!(lines[10], "Slide 11");
    }

    #[test]
    fn test_top_level_shapes_only() {
        let xml = r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:spTree>
<p:sp><p:nvSpPr><p:cNvPr id="2" name="Decoration"/></p:nvSpPr></p:sp>
<p:grpSp><p:nvGrpSpPr><p:cNvPr id="3" name="Group"/></p:nvGrpSpPr>
<p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>Grouped</a:t></a:r></a:p></p:txBody></p:sp>
</p:grpSp>
<p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>first</a:t></a:r><a:br/><a:r><a:t>second</a:t></a:r></a:p><a:p/></p:txBody></p:sp>
</p:spTree></p:cSld></p:sld>"#;

        let shapes = shape_texts(xml).unwrap();
        assert_eq!(shapes, vec![String::new(), "first\nsecond\n".to_string()]);
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide2.xml"), "ppt/slides/slide2.xml");
        assert_eq!(resolve_target("../ppt/slides/slide3.xml"), "ppt/slides/slide3.xml");
    }

    #[test]
    fn test_slide_number_parsing() {
        assert_eq!(slide_number("ppt/slides/slide3.xml"), Some(3));
        assert_eq!(slide_number("ppt/slides/_rels/slide3.xml.rels"), None);
        assert_eq!(slide_number("ppt/slideLayouts/slideLayout1.xml"), None);
    }

    #[test]
    fn test_not_a_zip_archive() {
        assert!(matches!(
            extract(b"plain bytes"),
            Err(ExtractionError::Presentation(_))
        ));
    }
}
