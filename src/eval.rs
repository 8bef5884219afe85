//! Answer evaluation: embedding cosine similarity against a reference string.

use crate::embed::{Embedder, ModelResult, cosine_similarity};

/// Score a generated answer against a reference string.
///
/// Pure function over the embedding capability: both strings are embedded and
/// compared by cosine similarity, in [-1, 1]. No thresholding — interpretation
/// is the caller's decision.
pub fn answer_similarity(
    embedder: &dyn Embedder,
    generated: &str,
    reference: &str,
) -> ModelResult<f32> {
    let generated_vec = embedder.encode(generated)?;
    let reference_vec = embedder.encode(reference)?;
    Ok(cosine_similarity(&generated_vec, &reference_vec))
}
