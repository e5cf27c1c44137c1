//! Paragraph-aware text chunking with configurable size and overlap.
//!
//! Text is split on blank lines, then adjacent paragraphs are merged back
//! together until a chunk would exceed `chunk_size` characters. Each new
//! chunk re-uses trailing paragraphs of the previous one, up to `overlap`
//! characters. A single paragraph longer than `chunk_size` becomes its own
//! oversized chunk.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::VecDeque;

/// Separator between paragraphs.
pub const SEPARATOR: &str = "\n\n";

/// A contiguous piece of the assembled context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Position in the chunk sequence (0-indexed)
    pub position: u32,

    /// Chunk text, whitespace-trimmed
    pub text: String,

    /// Length in characters
    pub char_count: usize,

    /// SHA-256 of the text
    pub hash: String,
}

impl Chunk {
    fn new(position: u32, text: String) -> Self {
        Self {
            position,
            char_count: text.chars().count(),
            hash: calculate_hash(&text),
            text,
        }
    }
}

/// Calculate SHA-256 hash of text.
pub fn calculate_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Chunk text into overlapping, paragraph-aligned segments.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    let separator_len = SEPARATOR.chars().count();
    let splits = text.split(SEPARATOR).filter(|s| !s.is_empty());

    let mut pieces: Vec<String> = Vec::new();
    let mut current: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for split in splits {
        let len = split.chars().count();
        if total + len + joiner_len(&current, separator_len) > chunk_size {
            if total > chunk_size {
                tracing::warn!(
                    "Created a chunk of size {}, which is longer than the specified {}",
                    total,
                    chunk_size
                );
            }

            if !current.is_empty() {
                if let Some(piece) = join_splits(&current) {
                    pieces.push(piece);
                }

                // Drop leading paragraphs until what remains fits the overlap window
                while total > overlap
                    || (total > 0 && total + len + joiner_len(&current, separator_len) > chunk_size)
                {
                    let joined_len = if current.len() > 1 { separator_len } else { 0 };
                    match current.pop_front() {
                        Some(first) => {
                            total = total.saturating_sub(first.chars().count() + joined_len)
                        }
                        None => break,
                    }
                }
            }
        }

        current.push_back(split);
        total += len + if current.len() > 1 { separator_len } else { 0 };
    }

    if let Some(piece) = join_splits(&current) {
        pieces.push(piece);
    }

    let chunks: Vec<Chunk> = pieces
        .into_iter()
        .enumerate()
        .map(|(position, text)| Chunk::new(position as u32, text))
        .collect();

    tracing::debug!(
        "Chunked text into {} chunks (size: {}, overlap: {})",
        chunks.len(),
        chunk_size,
        overlap
    );

    chunks
}

/// Separator length added when one more split joins `current`.
fn joiner_len(current: &VecDeque<&str>, separator_len: usize) -> usize {
    if current.is_empty() {
        0
    } else {
        separator_len
    }
}

fn join_splits(splits: &VecDeque<&str>) -> Option<String> {
    let joined = splits.iter().copied().collect::<Vec<_>>().join(SEPARATOR);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
