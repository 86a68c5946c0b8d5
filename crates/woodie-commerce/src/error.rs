//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart mutations never surface these to callers; they appear at the
/// storage seam and in catalog parsing.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// A record from the commerce API did not have the expected shape.
    #[error("Malformed {kind} record: {message}")]
    MalformedRecord { kind: &'static str, message: String },

    /// An attribute selection could not be parsed.
    #[error("Invalid attribute selection: {0}")]
    InvalidSelection(String),

    /// Cart storage failed.
    #[error("Cart storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "storage")]
impl From<woodie_cache::CacheError> for CommerceError {
    fn from(e: woodie_cache::CacheError) -> Self {
        match e {
            woodie_cache::CacheError::SerializeError(inner) => {
                CommerceError::SerializationError(inner.to_string())
            }
            other => CommerceError::StorageError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
