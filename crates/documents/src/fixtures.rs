//! In-memory documents for extractor and assembler tests.

use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};

/// PDF with one page per entry; an empty entry yields a page without text.
pub fn pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            vec![]
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Word document with one body paragraph per entry.
pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut document = Docx::new();
    for text in paragraphs {
        let paragraph = if text.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(Run::new().add_text(*text))
        };
        document = document.add_paragraph(paragraph);
    }
    pack_docx(document)
}

/// Word document with one paragraph of two runs separated by a tab.
pub fn docx_with_tab(before: &str, after: &str) -> Vec<u8> {
    let paragraph = Paragraph::new()
        .add_run(Run::new().add_text(before))
        .add_run(Run::new().add_tab().add_text(after));
    pack_docx(Docx::new().add_paragraph(paragraph))
}

fn pack_docx(document: Docx) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    document.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

const PRESENTATION_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const RELATIONSHIP_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Presentation: slides -> text shapes -> paragraphs. Text is written as-is,
/// so callers escape XML entities themselves.
pub fn pptx<S: AsRef<str>>(slides: &[Vec<Vec<S>>]) -> Vec<u8> {
    let order: Vec<usize> = (0..slides.len()).collect();
    build_pptx(slides, Some(&order))
}

/// Presentation whose slide list shows the parts in `order`, given as
/// indices into `slides`. Part names still number slides as written.
pub fn pptx_reordered<S: AsRef<str>>(slides: &[Vec<Vec<S>>], order: &[usize]) -> Vec<u8> {
    build_pptx(slides, Some(order))
}

/// Slide parts only, without `ppt/presentation.xml`.
pub fn pptx_parts_only<S: AsRef<str>>(slides: &[Vec<Vec<S>>]) -> Vec<u8> {
    build_pptx(slides, None)
}

fn build_pptx<S: AsRef<str>>(slides: &[Vec<Vec<S>>], order: Option<&[usize]>) -> Vec<u8> {
    let mut entries = vec![(
        "[Content_Types].xml".to_string(),
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#
            .to_string(),
    )];

    for (index, shapes) in slides.iter().enumerate() {
        let mut tree = String::new();
        for (id, paragraphs) in shapes.iter().enumerate() {
            tree.push_str(&format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="TextBox"/></p:nvSpPr><p:txBody><a:bodyPr/>"#,
                id + 2
            ));
            for paragraph in paragraphs {
                tree.push_str(&format!(
                    "<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>",
                    paragraph.as_ref()
                ));
            }
            tree.push_str("</p:txBody></p:sp>");
        }

        entries.push((
            format!("ppt/slides/slide{}.xml", index + 1),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="{}"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
                PRESENTATION_NS, tree
            ),
        ));
    }

    if let Some(order) = order {
        // rId1 is the slide master; slide part N is rId(N + 1)
        let mut relationships = format!(
            r#"<Relationship Id="rId1" Type="{}/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
            RELATIONSHIP_NS
        );
        for index in 0..slides.len() {
            relationships.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}/slide" Target="slides/slide{}.xml"/>"#,
                index + 2,
                RELATIONSHIP_NS,
                index + 1
            ));
        }

        let mut slide_list = String::new();
        for (position, index) in order.iter().enumerate() {
            slide_list.push_str(&format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                256 + position,
                index + 2
            ));
        }

        entries.push((
            "ppt/presentation.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="{}" xmlns:r="{}"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
                PRESENTATION_NS, RELATIONSHIP_NS, slide_list
            ),
        ));
        entries.push((
            "ppt/_rels/presentation.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                relationships
            ),
        ));
    }

    zip_archive(&entries)
}

/// Workbook of named sheets. Numeric strings become numeric cells and
/// empty strings leave the cell out. A `date:` or `time:` prefix writes the
/// serial number that follows with the builtin `mm-dd-yy` or `h:mm:ss` style.
pub fn xlsx(sheets: &[(&str, Vec<Vec<&str>>)]) -> Vec<u8> {
    const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

    let mut sheet_entries = String::new();
    let mut relationships = String::new();
    let mut entries = vec![
        (
            "[Content_Types].xml".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#
                .to_string(),
        ),
        (
            "_rels/.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
                RELATIONSHIP_NS
            ),
        ),
    ];

    for (index, (name, rows)) in sheets.iter().enumerate() {
        let number = index + 1;
        sheet_entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            name, number, number
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            number, RELATIONSHIP_NS, number
        ));

        let mut data = String::new();
        for (row_index, row) in rows.iter().enumerate() {
            data.push_str(&format!(r#"<row r="{}">"#, row_index + 1));
            for (column, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let reference = format!("{}{}", (b'A' + column as u8) as char, row_index + 1);
                if let Some(serial) = value.strip_prefix("date:") {
                    data.push_str(&format!(r#"<c r="{}" s="1"><v>{}</v></c>"#, reference, serial));
                } else if let Some(serial) = value.strip_prefix("time:") {
                    data.push_str(&format!(r#"<c r="{}" s="2"><v>{}</v></c>"#, reference, serial));
                } else if value.parse::<f64>().is_ok() {
                    data.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value));
                } else {
                    data.push_str(&format!(
                        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        reference, value
                    ));
                }
            }
            data.push_str("</row>");
        }

        entries.push((
            format!("xl/worksheets/sheet{}.xml", number),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}"><sheetData>{}</sheetData></worksheet>"#,
                MAIN_NS, data
            ),
        ));
    }

    entries.push((
        "xl/workbook.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}"><sheets>{}</sheets></workbook>"#,
            MAIN_NS, RELATIONSHIP_NS, sheet_entries
        ),
    ));
    // cellXfs: 0 general, 1 builtin 14 (mm-dd-yy), 2 builtin 21 (h:mm:ss)
    entries.push((
        "xl/styles.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="{}"><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"></xf><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"></xf><xf numFmtId="21" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"></xf></cellXfs></styleSheet>"#,
            MAIN_NS
        ),
    ));
    entries.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            relationships
        ),
    ));

    zip_archive(&entries)
}

fn zip_archive(entries: &[(String, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(name.as_str(), zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
