//! Embedding capability boundary.
//!
//! Components never reach for an ambient model: the [`Embedder`] handle is
//! injected into whatever needs it, so tests can substitute deterministic
//! stubs. Two implementations ship with the crate: the offline
//! [`HashEmbedder`] and the Ollama-backed [`OllamaEmbedder`].

pub mod hashed;
pub mod ollama;

pub use hashed::HashEmbedder;
pub use ollama::OllamaEmbedder;

use crate::error::ModelError;

/// Result type for model-capability operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// A sentence-embedding capability.
///
/// Returns one fixed-dimension vector per input string. Both single-string
/// and batched encode calls are part of the boundary.
pub trait Embedder: Send + Sync {
    /// Embed a single string into a fixed-dimension vector.
    fn encode(&self, text: &str) -> ModelResult<Vec<f32>>;

    /// Embed a batch of strings, one vector per input, order-preserving.
    fn encode_batch(&self, texts: &[String]) -> ModelResult<Vec<Vec<f32>>>;
}

/// Cosine similarity between two vectors, in [-1, 1].
///
/// A zero vector compares as 0.0 rather than NaN, so degenerate inputs
/// (e.g. an empty expansion fragment) stay well-defined downstream.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
