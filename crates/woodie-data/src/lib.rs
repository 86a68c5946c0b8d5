//! Commerce API client for the Woodie storefront.
//!
//! Talks to the hosted commerce API on behalf of the proxy routes and the
//! CLI. Every request carries the `store-id` header and asks for an uncached
//! response. Transient failures (5xx, timeouts, refused connections) are
//! retried according to a [`RetryPolicy`].
//!
//! # Example
//!
//! ```rust,no_run
//! use woodie_data::{ApiConfig, CommerceClient};
//!
//! # async fn run() -> Result<(), woodie_data::FetchError> {
//! let client = CommerceClient::new(ApiConfig::default().with_store_id("0000130"))?;
//!
//! // Every page of products, fetched concurrently after the first
//! let products = client.fetch_all_products(20).await?;
//!
//! // Raw bytes for relaying
//! let response = client.banners_raw().await?;
//! assert!(response.is_success());
//! # let _ = products;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod response;
pub mod retry;

pub use client::{CommerceClient, STORE_ID_HEADER};
pub use config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_STORE_ID};
pub use error::FetchError;
pub use response::{UpstreamResponse, DEFAULT_CONTENT_TYPE};
pub use retry::{BackoffStrategy, RetryPolicy};
