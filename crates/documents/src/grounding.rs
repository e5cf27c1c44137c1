//! Baseline grounding text.
//!
//! Loaded once at startup and prepended to the context of every question.
//! A missing grounding file is tolerated: the session continues with an
//! empty baseline and a warning.

use docqa_core::{AppError, AppResult};
use std::path::Path;

/// Immutable baseline text shared by all questions in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundingText {
    text: String,
}

impl GroundingText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Empty baseline.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the grounding file as UTF-8.
    pub fn try_load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Document(format!("Failed to read grounding file {:?}: {}", path, e))
        })?;

        tracing::debug!(
            "Loaded grounding text from {:?} ({} characters)",
            path,
            text.chars().count()
        );

        Ok(Self { text })
    }

    /// Read the grounding file, falling back to an empty baseline.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(grounding) => grounding,
            Err(e) => {
                tracing::warn!("{}; continuing without grounding text", e);
                Self::empty()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
