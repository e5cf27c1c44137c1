//! Per-format text extraction.
//!
//! Every extractor returns the document text with each logical unit (page,
//! paragraph, slide shape, CSV record, spreadsheet row) terminated by a
//! newline, so extracted documents can be concatenated directly.

mod delimited;
mod pdf;
mod slides;
mod spreadsheet;
mod text;
mod word;

use crate::format::DocumentFormat;
use serde::Serialize;
use thiserror::Error;

/// Failure to read a supported file's contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read presentation: {0}")]
    Presentation(String),

    #[error("could not read Word document: {0}")]
    WordProcessor(String),

    #[error("could not parse CSV: {0}")]
    Csv(String),

    #[error("could not read spreadsheet: {0}")]
    Spreadsheet(String),
}

/// Text extracted from one uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    pub name: String,
    pub format: DocumentFormat,
    pub text: String,
}

/// Extract plain text from file contents of the given format.
pub fn extract(format: DocumentFormat, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::PlainText => text::extract(bytes)?,
        DocumentFormat::Pdf => pdf::extract(bytes)?,
        DocumentFormat::Presentation => slides::extract(bytes)?,
        DocumentFormat::WordProcessor => word::extract(bytes)?,
        DocumentFormat::Csv => delimited::extract(bytes)?,
        DocumentFormat::Spreadsheet => spreadsheet::extract(bytes)?,
    };

    tracing::debug!(
        "Extracted {} characters from {} content",
        text.chars().count(),
        format.as_str()
    );

    Ok(text)
}
