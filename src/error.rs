//! Error types for the embedding benchmark.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while benchmarking.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error during serialization/deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The saved results file does not exist.
    #[error("Results file not found at '{0}'")]
    ResultsNotFound(PathBuf),

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Embedding API returned an error.
    #[error("Embedding API error: {0}")]
    Provider(String),

    /// Embedding API response could not be understood.
    #[error("Failed to parse embedding API response: {0}")]
    ProviderParse(String),

    /// Local model loading or inference error.
    #[error("Embedding model error: {0}")]
    Model(String),

    /// A provider returned a different number of vectors than it was given texts.
    #[error("Provider returned {found} embeddings for {expected} texts")]
    EmbeddingCountMismatch { expected: usize, found: usize },

    /// Two vectors that must share a dimension do not.
    #[error("Embedding dimension mismatch for {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// An embedding holds a NaN or infinite component.
    #[error("Embedding for {context} has a non-finite component at position {position}")]
    NonFiniteEmbedding { context: String, position: usize },

    /// A query names a relevant document that does not exist.
    #[error("Query {query} references document {index}, but only {doc_count} documents exist")]
    RelevantDocOutOfRange {
        query: usize,
        index: usize,
        doc_count: usize,
    },

    /// Nothing to evaluate.
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// Chart rendering error.
    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

impl BenchError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for BenchError {
    fn from(err: reqwest::Error) -> Self {
        BenchError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for BenchError {
    fn from(err: serde_yaml::Error) -> Self {
        BenchError::Config(err.to_string())
    }
}

#[cfg(feature = "local")]
impl From<candle_core::Error> for BenchError {
    fn from(err: candle_core::Error) -> Self {
        BenchError::Model(err.to_string())
    }
}
