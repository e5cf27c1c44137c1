//! Document ingestion for docqa.
//!
//! Turns uploaded files into the context string sent with every question:
//! - [`format`]: extension allow-list and format detection
//! - [`extract`]: one text extractor per format
//! - [`grounding`]: the baseline text loaded once per session
//! - [`assembler`]: grounding + extracted documents, plus the chunking pass
//! - [`chunker`]: character splitter used by the assembler

pub mod assembler;
pub mod chunker;
pub mod extract;
pub mod format;
pub mod grounding;
pub mod upload;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use assembler::{
    AssembleError, AssembledContext, ContextAssembler, FileFailure, CHUNK_OVERLAP, CHUNK_SIZE,
};
pub use chunker::{split_text, Chunk};
pub use extract::{extract, ExtractedDocument, ExtractionError};
pub use format::{DocumentFormat, ALLOWED_EXTENSIONS};
pub use grounding::GroundingText;
pub use upload::UploadedFile;
