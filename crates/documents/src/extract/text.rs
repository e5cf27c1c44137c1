use super::ExtractionError;

/// Plain text must be valid UTF-8. A trailing newline is always appended.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ExtractionError::Encoding(e.to_string()))?;
    Ok(format!("{}\n", text))
}
