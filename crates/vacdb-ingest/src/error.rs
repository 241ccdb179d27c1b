//! Error types for vacancy ingestion.

use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// A failed fetch from the remote vacancy API.
///
/// Fetch failures are fatal to a run: the pipeline produces no partial
/// output and nothing is handed to the store.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or non-2xx response
    #[error("Vacancy API request failed: {0}. Check network connectivity and VACDB_API_BASE_URL.")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Vacancy API returned a malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Client configuration is invalid
    #[error("Ingestion configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
