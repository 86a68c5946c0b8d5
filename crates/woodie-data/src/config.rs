//! Client configuration.

use crate::retry::RetryPolicy;
use std::time::Duration;

/// Commerce API host used by the storefront.
pub const DEFAULT_BASE_URL: &str = "https://ecommerce-saas-server-wine.vercel.app";

/// Store the storefront sells from.
pub const DEFAULT_STORE_ID: &str = "0000130";

/// Where and how to reach the commerce API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and host, optionally with a path prefix. `/api/v1/...` is appended.
    pub base_url: String,
    /// Sent as the `store-id` header and used in the categories path.
    pub store_id: String,
    /// Total time allowed per request.
    pub timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            store_id: DEFAULT_STORE_ID.to_string(),
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl ApiConfig {
    /// Default configuration against another host.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the store id.
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = store_id.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
