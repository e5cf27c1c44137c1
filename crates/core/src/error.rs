//! Error types for docqa.
//!
//! This module defines a unified error enum covering the infrastructure
//! failures of the application: configuration, I/O, LLM transport, document
//! handling, prompt rendering and serialization. Domain outcomes that the
//! user sees in the transcript (unsupported file, empty content, ...) are
//! modelled separately in `docqa-chat`.

use thiserror::Error;

/// Unified error type for docqa.
///
/// Library functions return `Result<T, AppError>` and never panic.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Document reading and extraction errors
    #[error("Document error: {0}")]
    Document(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Llm("connection refused".to_string());
        assert_eq!(err.to_string(), "LLM error: connection refused");
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err: AppError = yaml_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
