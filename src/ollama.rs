//! Ollama client for the model-capability boundaries.
//!
//! Both the sentence-embedding capability and the generative query-expansion
//! capability can be backed by a local Ollama server. The client is sync
//! (ureq) like the rest of the pipeline; a slow model call blocks the run.
//!
//! Model failures are fatal and surface as distinct [`ModelError`] variants —
//! silent degradation here would corrupt similarity scoring.

use crate::embed::ModelResult;
use crate::error::ModelError;

/// Configuration for the Ollama client.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL for the Ollama API.
    pub base_url: String,
    /// Model name to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "llama3.2".into(),
            timeout_secs: 120,
        }
    }
}

/// Client for the Ollama REST API.
pub struct OllamaClient {
    config: OllamaConfig,
}

impl OllamaClient {
    /// Connect to the Ollama server, probing availability first.
    ///
    /// Returns [`ModelError::Unavailable`] when the server cannot be reached,
    /// so the run aborts before any index is built against a dead backend.
    pub fn connect(config: OllamaConfig) -> ModelResult<Self> {
        let client = Self { config };
        if client.probe() {
            Ok(client)
        } else {
            Err(ModelError::Unavailable {
                url: client.config.base_url.clone(),
            })
        }
    }

    /// Probe the Ollama server with a lightweight request to `/api/tags`.
    pub fn probe(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(5))
            .build();
        matches!(agent.get(&url).call(), Ok(resp) if resp.status() == 200)
    }

    /// The model name being used.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// POST a JSON body and parse the JSON response.
    fn post(&self, endpoint: &str, body: &serde_json::Value) -> ModelResult<serde_json::Value> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .build();

        let body_str =
            serde_json::to_string(body).map_err(|e| ModelError::RequestFailed {
                message: format!("JSON serialize error: {e}"),
            })?;

        let resp = agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body_str)
            .map_err(|e: ureq::Error| ModelError::RequestFailed {
                message: e.to_string(),
            })?;

        let resp_str = resp.into_string().map_err(|e| ModelError::ParseError {
            message: e.to_string(),
        })?;

        serde_json::from_str(&resp_str).map_err(|e| ModelError::ParseError {
            message: e.to_string(),
        })
    }

    /// Generate one bounded completion for a prompt.
    ///
    /// `max_tokens` caps the generated continuation via `num_predict`.
    pub fn generate(&self, prompt: &str, max_tokens: usize) -> ModelResult<String> {
        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": { "num_predict": max_tokens },
        });

        let json = self.post("/api/generate", &body)?;
        json["response"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ModelError::ParseError {
                message: "missing 'response' field".into(),
            })
    }

    /// Embed one string with the configured embedding model.
    pub fn embed(&self, text: &str) -> ModelResult<Vec<f32>> {
        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": text,
        });

        let json = self.post("/api/embeddings", &body)?;
        let values = json["embedding"]
            .as_array()
            .ok_or_else(|| ModelError::ParseError {
                message: "missing 'embedding' field".into(),
            })?;

        Ok(values
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect())
    }
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_to_unreachable_server_errors() {
        let config = OllamaConfig {
            base_url: "http://127.0.0.1:1".into(), // unreachable port
            ..Default::default()
        };
        let result = OllamaClient::connect(config);
        assert!(matches!(result, Err(ModelError::Unavailable { .. })));
    }

    #[test]
    fn default_config_values() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.timeout_secs, 120);
    }
}
