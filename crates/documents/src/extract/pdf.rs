use super::ExtractionError;
use lopdf::Document;

/// Text of every page that yields any, in page order, one newline per page.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut content = String::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => {
                let text = text.trim_end();
                if !text.trim_start().is_empty() {
                    content.push_str(text);
                    content.push('\n');
                }
            }
            Err(e) => {
                tracing::debug!("No text extracted from PDF page {}: {}", page_number, e);
            }
        }
    }

    Ok(content)
}
