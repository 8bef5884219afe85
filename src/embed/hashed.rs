//! Deterministic hash-projection embedding.
//!
//! Maps each token to a seeded random projection vector, so the same text
//! always produces the same embedding regardless of when or where it is
//! computed. Texts sharing tokens get correlated vectors, which is enough
//! signal for retrieval over small phrase sets without any model download.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::{Embedder, ModelResult};

/// Offline embedder: token-hash seeded random projections.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    /// Default projection dimension.
    pub const DEFAULT_DIM: usize = 384;

    /// Create an embedder with the given projection dimension.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// The fixed output dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Deterministic projection vector for one normalized token.
    ///
    /// The token hash seeds the RNG, so the same token always maps to the
    /// same vector.
    fn token_vector(&self, token: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        let mut rng = rand::rngs::StdRng::seed_from_u64(hasher.finish());
        (0..self.dim).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIM)
    }
}

/// Lowercase a token and strip punctuation from its edges, so "MDM2?" and
/// "mdm2" project to the same vector.
fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

impl Embedder for HashEmbedder {
    fn encode(&self, text: &str) -> ModelResult<Vec<f32>> {
        let mut acc = vec![0.0f32; self.dim];
        for token in text.split_whitespace() {
            let token = normalize(token);
            if token.is_empty() {
                continue;
            }
            for (slot, component) in acc.iter_mut().zip(self.token_vector(&token)) {
                *slot += component;
            }
        }
        // Texts with no tokens embed as the zero vector; cosine treats that
        // as similarity 0.0 instead of erroring.
        Ok(acc)
    }

    fn encode_batch(&self, texts: &[String]) -> ModelResult<Vec<Vec<f32>>> {
        texts.par_iter().map(|text| self.encode(text)).collect()
    }
}
