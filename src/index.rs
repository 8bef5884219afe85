//! Relation embedding index: parallel phrase/vector storage with brute-force
//! top-k cosine retrieval.
//!
//! Built once from the full triplet slice (one batched embedding call) and
//! read-only afterward. No deduplication: duplicate phrases produce duplicate
//! index entries. Brute-force search is the intended algorithm at this scale
//! (triplet counts in the dozens to low thousands).

use std::cmp::Ordering;

use crate::embed::{Embedder, ModelResult, cosine_similarity};
use crate::error::ModelError;
use crate::triplet::Triplet;

/// A retrieval hit: relation phrase plus similarity score.
#[derive(Debug, Clone)]
pub struct Retrieval {
    /// The matching relation phrase.
    pub phrase: String,
    /// Cosine similarity to the query, in [-1, 1].
    pub score: f32,
}

/// Order-preserving index of relation phrases and their embeddings.
///
/// Index i of the phrase list corresponds to index i of the vector list.
pub struct RelationIndex {
    phrases: Vec<String>,
    vectors: Vec<Vec<f32>>,
    dim: usize,
}

impl RelationIndex {
    /// Embed every triplet's relation phrase in one batched call.
    pub fn build(triplets: &[Triplet], embedder: &dyn Embedder) -> ModelResult<Self> {
        let phrases: Vec<String> = triplets.iter().map(Triplet::phrase).collect();
        let vectors = embedder.encode_batch(&phrases)?;
        let dim = vectors.first().map(Vec::len).unwrap_or(0);
        tracing::info!(entries = phrases.len(), dim, "relation index built");
        Ok(Self {
            phrases,
            vectors,
            dim,
        })
    }

    /// Number of indexed relation phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the index holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// The indexed phrases, in original triplet order.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Top-k retrieval: embed the query once, score every indexed vector,
    /// and return up to k hits in descending-similarity order.
    ///
    /// Equal scores tie-break stably by original triplet index (earlier
    /// triplet wins) — this affects best-response selection upstream.
    pub fn retrieve(
        &self,
        embedder: &dyn Embedder,
        query: &str,
        k: usize,
    ) -> ModelResult<Vec<Retrieval>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = embedder.encode(query)?;
        if query_vec.len() != self.dim {
            return Err(ModelError::DimensionMismatch {
                expected: self.dim,
                actual: query_vec.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .map(|v| cosine_similarity(&query_vec, v))
            .enumerate()
            .collect();

        // Stable sort: equal scores keep original index order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k.min(self.phrases.len()));

        Ok(scored
            .into_iter()
            .map(|(i, score)| Retrieval {
                phrase: self.phrases[i].clone(),
                score,
            })
            .collect())
    }
}

impl std::fmt::Debug for RelationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationIndex")
            .field("entries", &self.phrases.len())
            .field("dim", &self.dim)
            .finish()
    }
}
