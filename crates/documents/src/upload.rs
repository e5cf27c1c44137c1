//! Uploaded files.

use crate::format::DocumentFormat;
use docqa_core::{AppError, AppResult};
use std::path::Path;

/// A file submitted with a question: its declared name and full contents.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload from an in-memory buffer.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file fully into memory, named after its final path component.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::Document(format!("Not a file path: {:?}", path)))?;

        let bytes = std::fs::read(path)
            .map_err(|e| AppError::Document(format!("Failed to read {:?}: {}", path, e)))?;

        tracing::debug!("Read {} ({} bytes)", name, bytes.len());

        Ok(Self { name, bytes })
    }

    /// Declared file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Format inferred from the name, `None` if the extension is not allowed.
    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_name(&self.name)
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
