//! Document chunking for retrieval.
//!
//! Splits raw text into overlapping fixed-size character windows.

use serde::{Deserialize, Serialize};

/// A contiguous slice of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk in the document (0-based).
    pub id: u64,
    /// Chunk text.
    pub text: String,
    /// Offset of the first character, counted in characters from the
    /// start of the document.
    pub start_offset: usize,
}

/// Sliding-window chunker over characters.
///
/// Windows advance by `chunk_size - overlap` characters, so adjacent chunks
/// share `overlap` characters. Offsets and sizes are character counts, not
/// bytes, so multi-byte text never splits inside a scalar.
#[derive(Debug, Clone)]
pub struct CharacterChunker {
    chunk_size: usize,
    overlap: usize,
}

impl CharacterChunker {
    /// Create a chunker. An overlap of `chunk_size` or more is clamped to
    /// `chunk_size - 1` so the window always advances.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let overlap = if chunk_size == 0 {
            0
        } else {
            overlap.min(chunk_size - 1)
        };
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Split text into chunks.
    ///
    /// Empty input produces no chunks. A `chunk_size` of 0 or text no longer
    /// than one window produces a single chunk covering the whole text. The
    /// final window is truncated to the remaining text.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        if self.chunk_size == 0 || chars.len() <= self.chunk_size {
            return vec![Chunk {
                id: 0,
                text: text.to_string(),
                start_offset: 0,
            }];
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(Chunk {
                id: chunks.len() as u64,
                text: chars[start..end].iter().collect(),
                start_offset: start,
            });
            // Once a window reaches the end, later windows would add no
            // new characters.
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }

    /// Configured window size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured overlap in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }
}
