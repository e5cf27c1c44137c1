//! Supported document formats.

use serde::Serialize;
use std::path::Path;

/// Extensions accepted at the upload boundary.
pub const ALLOWED_EXTENSIONS: [&str; 8] = ["pdf", "docx", "doc", "pptx", "ppt", "txt", "csv", "xlsx"];

/// Format of an uploaded file, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    /// `.pptx`, and `.ppt` routed through the same OOXML reader
    Presentation,
    /// `.docx`, and `.doc` routed through the same OOXML reader
    WordProcessor,
    Csv,
    Spreadsheet,
}

impl DocumentFormat {
    /// Detect format from a bare extension (case-insensitive, no dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "pptx" | "ppt" => Some(Self::Presentation),
            "docx" | "doc" => Some(Self::WordProcessor),
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Detect format from a file name. Names without an extension are unsupported.
    pub fn from_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "text",
            Self::Pdf => "pdf",
            Self::Presentation => "presentation",
            Self::WordProcessor => "word",
            Self::Csv => "csv",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}
