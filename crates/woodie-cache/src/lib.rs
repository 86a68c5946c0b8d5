//! Type-safe key-value storage for the Woodie storefront.
//!
//! Values are stored as JSON under string keys in a pluggable [`KvStore`]:
//! an in-process [`MemoryStore`] for tests, or a [`FileStore`] that keeps
//! one file per key in a directory, which is how the CLI persists the cart
//! between runs.
//!
//! # Example
//!
//! ```rust
//! use woodie_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     id: String,
//!     qty: u32,
//! }
//!
//! let cache = Cache::memory();
//!
//! // Store a value
//! cache.set("woodie_cart_v1", &vec![Line { id: "teak-chair".into(), qty: 2 }])?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<Line>> = cache.get("woodie_cart_v1")?;
//! assert_eq!(lines.unwrap()[0].qty, 2);
//!
//! // Delete a value
//! cache.delete("woodie_cart_v1")?;
//! # Ok::<(), woodie_cache::CacheError>(())
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
