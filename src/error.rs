//! Error types for Circles Search
//!
//! All failure modes of the search client, cache, and persistence layers.

use thiserror::Error;

/// Main error type for Circles Search operations
#[derive(Error, Debug)]
pub enum CirclesError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    Api { status: u16, url: String },

    #[error("Query too short: need at least {min} characters, got {got}")]
    QueryTooShort { min: usize, got: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Circles Search operations
pub type Result<T> = std::result::Result<T, CirclesError>;

impl CirclesError {
    /// Check if this error is transient (a retry may succeed)
    pub fn is_transient(&self) -> bool {
        match self {
            CirclesError::Http(e) => e.is_timeout() || e.is_connect(),
            CirclesError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
