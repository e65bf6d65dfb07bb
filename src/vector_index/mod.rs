//! In-memory vector index with cosine similarity search.
//!
//! Each session owns one index over its document chunks. Inserts enforce a
//! single embedding dimension; searches rank by cosine similarity with a
//! bounded heap and break score ties by chunk id.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::chunking::Chunk;
use crate::error::{Result, SvarError};

/// A retrieved chunk paired with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug, Clone)]
struct Entry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// Chunk vectors for a single document, searchable by cosine similarity.
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<Entry>,
    dimensions: Option<usize>,
}

impl VectorIndex {
    /// Creates an empty index. The first insert establishes the dimension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index that only accepts vectors of the given dimension.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            entries: Vec::new(),
            dimensions: Some(dimensions),
        }
    }

    /// Adds a chunk and its embedding vector to the index.
    ///
    /// Every vector must match the index dimension; a mismatch is rejected
    /// and leaves the index unchanged.
    pub fn insert(&mut self, chunk: Chunk, vector: Vec<f32>) -> Result<()> {
        match self.dimensions {
            Some(expected) if vector.len() != expected => {
                return Err(SvarError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
            Some(_) => {}
            None => self.dimensions = Some(vector.len()),
        }

        self.entries.push(Entry { chunk, vector });
        Ok(())
    }

    /// Returns the `k` most similar chunks, highest score first.
    ///
    /// Ties are broken by ascending chunk id, so repeated searches over the
    /// same index return identical results.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<QueryResult> {
        if k == 0 || self.entries.is_empty() {
            return Vec::new();
        }

        // Bounded min-heap: the root is the worst hit seen so far, so the
        // heap never holds more than one candidate past the result size.
        let mut heap = BinaryHeap::with_capacity(k.min(self.entries.len()) + 1);
        for entry in &self.entries {
            let score = cosine_similarity(query, &entry.vector);
            heap.push(Hit {
                score,
                chunk_id: entry.chunk.id,
                entry,
            });
            if heap.len() > k {
                heap.pop();
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|hit| QueryResult {
                chunk: hit.entry.chunk.clone(),
                score: hit.score,
            })
            .collect()
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The embedding dimension, once established.
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}

/// Heap entry ordered so that the "greatest" element is the worst hit:
/// lowest score, then highest chunk id.
struct Hit<'a> {
    score: f32,
    chunk_id: u64,
    entry: &'a Entry,
}

impl Ord for Hit<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then(self.chunk_id.cmp(&other.chunk_id))
    }
}

impl PartialOrd for Hit<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Hit<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hit<'_> {}

/// Cosine similarity between two vectors, always within `[-1.0, 1.0]`.
///
/// Mismatched lengths, empty vectors, and zero-magnitude vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a * norm_b);
    if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
