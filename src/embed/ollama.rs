//! Ollama-backed sentence embeddings.

use crate::ollama::OllamaClient;

use super::{Embedder, ModelResult};

/// Embedder backed by an Ollama embedding model (e.g. `nomic-embed-text`).
#[derive(Debug)]
pub struct OllamaEmbedder {
    client: OllamaClient,
}

impl OllamaEmbedder {
    /// Wrap a connected Ollama client.
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }
}

impl Embedder for OllamaEmbedder {
    fn encode(&self, text: &str) -> ModelResult<Vec<f32>> {
        self.client.embed(text)
    }

    fn encode_batch(&self, texts: &[String]) -> ModelResult<Vec<Vec<f32>>> {
        // The embeddings endpoint takes one prompt per request; the batch
        // contract is kept by sequential calls, aborting on the first failure.
        texts.iter().map(|text| self.client.embed(text)).collect()
    }
}
