//! Failures a question can end in.
//!
//! Each kind carries the exact text shown in the answer slot of the
//! transcript; callers branch on the kind, not on the text.

use docqa_core::AppError;
use docqa_documents::AssembleError;
use serde::Serialize;
use thiserror::Error;

/// Tagged outcome of a failed question.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AnswerError {
    #[error("Unsupported file type")]
    UnsupportedFileType,

    #[error("Failed to load the document: {0}")]
    Extraction(String),

    #[error("No text found in the document")]
    NoContent,

    /// Transport or API failure of the completion request
    #[error("Failed to load the document: {0}")]
    Completion(String),
}

impl AnswerError {
    /// Stable identifier for the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFileType => "unsupported_file_type",
            Self::Extraction(_) => "extraction",
            Self::NoContent => "no_content",
            Self::Completion(_) => "completion",
        }
    }

    /// Whether asking the same question again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Completion(_))
    }

    /// Wrap an infrastructure error raised while generating the answer.
    pub fn completion(error: &AppError) -> Self {
        let detail = match error {
            AppError::Llm(message) => message.clone(),
            other => other.to_string(),
        };
        Self::Completion(detail)
    }
}

impl From<AssembleError> for AnswerError {
    fn from(error: AssembleError) -> Self {
        match error {
            AssembleError::UnsupportedFileType { .. } => Self::UnsupportedFileType,
            AssembleError::Extraction { .. } => Self::Extraction(error.to_string()),
            AssembleError::NoContent => Self::NoContent,
        }
    }
}
