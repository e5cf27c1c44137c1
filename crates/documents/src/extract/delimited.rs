use super::ExtractionError;

/// Each CSV record becomes one line with its fields joined by a single space.
/// The first row is data like any other; ragged rows are accepted.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ExtractionError::Encoding(e.to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut content = String::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExtractionError::Csv(e.to_string()))?;
        content.push_str(&record.iter().collect::<Vec<_>>().join(" "));
        content.push('\n');
    }

    Ok(content)
}
