use super::ExtractionError;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};

/// Body paragraphs in document order, one line each. Empty paragraphs
/// become blank lines; tables and headers are not part of the body text.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx =
        docx_rs::read_docx(bytes).map_err(|e| ExtractionError::WordProcessor(e.to_string()))?;

    let mut content = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            collect_text(&paragraph.children, &mut content);
            content.push('\n');
        }
    }

    Ok(content)
}

fn collect_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(text) => out.push_str(&text.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_text(&link.children, out),
            _ => {}
        }
    }
}
