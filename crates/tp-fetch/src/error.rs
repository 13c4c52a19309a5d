//! Error types for trade retrieval

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("All retries exhausted: {0}")]
    RetriesExhausted(String),

    #[error("Malformed page: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// A full page came back with nothing to advance the cursor from.
    #[error("Pagination stalled at cursor {cursor:?}: full page without records")]
    Stalled { cursor: Option<i64> },

    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Connection(_) => true,
            FetchError::Timeout => true,
            FetchError::RateLimited { .. } => true,
            FetchError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn retry_after(&self) -> Option<std::time::Duration> {
        if let FetchError::RateLimited { retry_after_ms } = self {
            Some(std::time::Duration::from_millis(*retry_after_ms))
        } else {
            None
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors can carry the full URL, which includes the API key
        let e = e.without_url();
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Http { status: status.as_u16(), message: e.to_string() }
        } else {
            FetchError::Connection(e.to_string())
        }
    }
}
