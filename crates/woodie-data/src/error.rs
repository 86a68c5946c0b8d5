//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the commerce API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to build or send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Could not connect to the server.
    #[error("Connection failed: {0}")]
    ConnectionError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl FetchError {
    /// Whether retrying might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::ConnectionError(_) | FetchError::Timeout => true,
            FetchError::HttpError { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::ParseError(e.to_string())
    }
}
