//! Rich diagnostic error types for the kgqa pipeline.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias using the top-level error type.
pub type KgqaResult<T> = std::result::Result<T, KgqaError>;

/// Top-level error type for the kgqa pipeline.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum KgqaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pipeline(#[from] PipelineError),
}

// ---------------------------------------------------------------------------
// Triplet store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("failed to read triplet file {path}: {source}")]
    #[diagnostic(
        code(kgqa::store::io),
        help(
            "Check that the triplet file exists and is readable. \
             Each line should look like ('head', 'relation', 'tail')."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Model capability errors (embedding and generation)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("Ollama is not available at {url}")]
    #[diagnostic(
        code(kgqa::model::unavailable),
        help(
            "Start Ollama with `ollama serve`, or omit --embed-model and \
             --expand to run with the built-in offline capabilities."
        )
    )]
    Unavailable { url: String },

    #[error("model request failed: {message}")]
    #[diagnostic(
        code(kgqa::model::request_failed),
        help("Check that the Ollama server is running and the model is pulled.")
    )]
    RequestFailed { message: String },

    #[error("failed to parse model response: {message}")]
    #[diagnostic(
        code(kgqa::model::parse_error),
        help("The model returned an unexpected response format.")
    )]
    ParseError { message: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    #[diagnostic(
        code(kgqa::model::dim_mismatch),
        help(
            "The query and the relation index must be embedded by the same \
             model. Rebuild the index with the embedder you are querying with."
        )
    )]
    DimensionMismatch { expected: usize, actual: usize },
}

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error("failed to load query cases from {path}: {message}")]
    #[diagnostic(
        code(kgqa::pipeline::query_load),
        help(
            "The query file must be a JSON array of objects with \
             \"query\" and \"ground_truth\" string fields."
        )
    )]
    QueryLoad { path: String, message: String },
}
