use thiserror::Error;

/// Errors surfaced to search callers.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Empty/whitespace query or non-positive top_k. Not retried.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// A search arrived before the first snapshot was installed.
    #[error("search index is not ready")]
    IndexNotReady,
}

/// Errors from the embedding provider. Recovered locally: a failed query
/// embedding degrades that search to lexical-only, never fails the request.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("embedding API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("embedding API returned no vectors")]
    Empty,
}

/// Configuration rejected at startup or refresh. Fail fast, never silently
/// renormalize.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("search weight {name} must be within [0, 1], got {value}")]
    WeightOutOfRange { name: &'static str, value: f64 },
    #[error("tfidf_weight + embedding_weight must equal 1.0, got {sum}")]
    WeightsDoNotSumToOne { sum: f64 },
    #[error("unknown embedding provider: {0:?} (expected \"ollama\" or \"openai\")")]
    UnknownProvider(String),
    #[error("embedding dimension must be positive")]
    InvalidDimension,
}
