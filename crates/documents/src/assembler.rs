//! Context assembly.
//!
//! The context for a question is the grounding text followed by the
//! extracted text of every uploaded file, in upload order. Files are
//! processed strictly in order, so an unsupported file stops processing
//! at its position without reading anything after it.

use crate::chunker::{split_text, Chunk};
use crate::extract::{extract, ExtractedDocument, ExtractionError};
use crate::grounding::GroundingText;
use crate::upload::UploadedFile;
use docqa_core::ExtractionPolicy;
use serde::Serialize;
use thiserror::Error;

/// Default chunk size in characters.
pub const CHUNK_SIZE: usize = 800;

/// Default overlap between consecutive chunks in characters.
pub const CHUNK_OVERLAP: usize = 100;

/// Why a context could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("Unsupported file type: {name}")]
    UnsupportedFileType { name: String },

    #[error("{name}: {source}")]
    Extraction {
        name: String,
        #[source]
        source: ExtractionError,
    },

    #[error("No text found in the document")]
    NoContent,
}

/// A file left out of the context under [`ExtractionPolicy::Skip`].
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub name: String,
    pub error: String,
}

/// Result of a successful assembly.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledContext {
    /// Whitespace-trimmed context, never empty
    pub text: String,

    /// Chunking of `text`. Informational: the full text is what gets sent.
    pub chunks: Vec<Chunk>,

    /// Extracted files in upload order
    pub documents: Vec<ExtractedDocument>,

    /// Files dropped because extraction failed
    pub skipped: Vec<FileFailure>,
}

/// Builds question contexts from grounding text and uploads.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    policy: ExtractionPolicy,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(ExtractionPolicy::default())
    }
}

impl ContextAssembler {
    pub fn new(policy: ExtractionPolicy) -> Self {
        Self {
            policy,
            chunk_size: CHUNK_SIZE,
            chunk_overlap: CHUNK_OVERLAP,
        }
    }

    /// Override chunking parameters.
    pub fn with_chunking(mut self, chunk_size: usize, chunk_overlap: usize) -> Self {
        self.chunk_size = chunk_size;
        self.chunk_overlap = chunk_overlap;
        self
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.policy
    }

    /// Concatenate grounding and extracted file text into one context.
    pub fn assemble(
        &self,
        grounding: &GroundingText,
        files: &[UploadedFile],
    ) -> Result<AssembledContext, AssembleError> {
        let mut content = grounding.as_str().to_string();
        let mut documents = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for file in files {
            let format = file.format().ok_or_else(|| {
                tracing::info!("Rejected upload with unsupported type: {}", file.name());
                AssembleError::UnsupportedFileType {
                    name: file.name().to_string(),
                }
            })?;

            match extract(format, file.bytes()) {
                Ok(text) => {
                    content.push_str(&text);
                    documents.push(ExtractedDocument {
                        name: file.name().to_string(),
                        format,
                        text,
                    });
                }
                Err(error) => match self.policy {
                    ExtractionPolicy::Abort => {
                        return Err(AssembleError::Extraction {
                            name: file.name().to_string(),
                            source: error,
                        });
                    }
                    ExtractionPolicy::Skip => {
                        tracing::warn!("Skipping {}: {}", file.name(), error);
                        skipped.push(FileFailure {
                            name: file.name().to_string(),
                            error: error.to_string(),
                        });
                    }
                },
            }
        }

        let text = content.trim();
        if text.is_empty() {
            return Err(AssembleError::NoContent);
        }

        let chunks = split_text(text, self.chunk_size, self.chunk_overlap);

        tracing::debug!(
            "Assembled context from {} files: {} characters, {} chunks",
            documents.len(),
            text.chars().count(),
            chunks.len()
        );

        Ok(AssembledContext {
            text: text.to_string(),
            chunks,
            documents,
            skipped,
        })
    }
}
