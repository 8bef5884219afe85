//! Query expansion: turn one question into related candidate questions.
//!
//! Expansion quality is an opaque external capability: the generative model
//! may produce duplicated, malformed, or empty fragments, and downstream
//! consumers must tolerate that. The trait exists so tests can inject
//! fixed-output stubs.

use crate::embed::ModelResult;
use crate::ollama::OllamaClient;

/// A query-expansion capability.
pub trait QueryExpander: Send + Sync {
    /// Produce an ordered, finite sequence of candidate expanded queries.
    fn expand(&self, query: &str) -> ModelResult<Vec<String>>;
}

/// Returns the input query unchanged as the only expansion.
///
/// The offline default when no generative backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExpander;

impl QueryExpander for PassthroughExpander {
    fn expand(&self, query: &str) -> ModelResult<Vec<String>> {
        Ok(vec![query.to_string()])
    }
}

/// Generative expansion via an Ollama model.
#[derive(Debug)]
pub struct OllamaExpander {
    client: OllamaClient,
    max_tokens: usize,
}

impl OllamaExpander {
    /// Cap on generated continuation length.
    pub const DEFAULT_MAX_TOKENS: usize = 50;

    /// Wrap a connected Ollama client.
    pub fn new(client: OllamaClient) -> Self {
        Self {
            client,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

impl QueryExpander for OllamaExpander {
    fn expand(&self, query: &str) -> ModelResult<Vec<String>> {
        let prompt =
            format!("Expand the query: '{query}' into more specific and related questions.");
        let text = self.client.generate(&prompt, self.max_tokens)?;
        tracing::debug!(model = self.client.model(), "generated query expansion");
        Ok(split_expansions(&text))
    }
}

/// Split raw generated text into expansion fragments on the literal `". "`.
///
/// No further cleaning, deduplication, or well-formedness validation —
/// degenerate fragments are the consumer's problem.
fn split_expansions(text: &str) -> Vec<String> {
    text.split(". ").map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_returns_query_itself() {
        let expansions = PassthroughExpander.expand("What activates p53?").unwrap();
        assert_eq!(expansions, vec!["What activates p53?".to_string()]);
    }

    #[test]
    fn split_on_sentence_boundary() {
        let fragments =
            split_expansions("What binds p53?. Which gene regulates MDM2?. How is p53 degraded?");
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0], "What binds p53?");
        assert_eq!(fragments[2], "How is p53 degraded?");
    }

    #[test]
    fn degenerate_output_is_not_an_error() {
        // A single fragment without the delimiter comes back as-is.
        assert_eq!(split_expansions("no delimiter here"), vec!["no delimiter here"]);
        // Empty text yields a single empty fragment.
        assert_eq!(split_expansions(""), vec![String::new()]);
    }
}
