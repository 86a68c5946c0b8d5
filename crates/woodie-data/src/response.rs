//! Upstream responses, kept raw so they can be relayed unchanged.

use crate::FetchError;
use serde::de::DeserializeOwned;

/// Content type assumed when the upstream sends none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A buffered upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// Create a new response.
    pub fn new(status: u16, content_type: Option<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response was a server error (5xx status).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Content type to relay, defaulting to JSON.
    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> UpstreamResponse {
        UpstreamResponse::new(status, None, body.to_vec())
    }

    #[test]
    fn test_status_checks() {
        assert!(make_response(200, b"").is_success());
        assert!(!make_response(404, b"").is_success());
        assert!(make_response(502, b"").is_server_error());
        assert!(!make_response(404, b"").is_server_error());
    }

    #[test]
    fn test_content_type_default() {
        assert_eq!(make_response(200, b"").content_type_or_default(), "application/json");
        let html = UpstreamResponse::new(200, Some("text/html".into()), vec![]);
        assert_eq!(html.content_type_or_default(), "text/html");
    }

    #[test]
    fn test_json() {
        let value: serde_json::Value = make_response(200, br#"{"ok":true}"#).json().unwrap();
        assert_eq!(value["ok"], true);
        assert!(make_response(200, b"nope").json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_error_for_status() {
        assert!(make_response(200, b"fine").error_for_status().is_ok());
        match make_response(404, b"missing").error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "missing");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
