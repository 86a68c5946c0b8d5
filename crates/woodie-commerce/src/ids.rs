//! Newtype IDs for type-safe identifiers.
//!
//! The commerce API hands out opaque strings for everything. Wrapping them
//! keeps a product slug from being passed where a variant `_id` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the ID is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Product identifier: the URL slug (`path`), or the record `_id` when
    /// the product has no slug.
    ProductId
);
define_id!(
    /// Variant record `_id`.
    VariantId
);
define_id!(
    /// Cart line key. One line exists per purchasable unit.
    LineId
);

impl LineId {
    /// Key for a product, or for one of its variants.
    ///
    /// Variants of the same product get distinct lines so they never merge.
    pub fn for_product(product: &ProductId, variant: Option<&VariantId>) -> Self {
        match variant {
            Some(v) if !v.is_blank() => Self(format!("{}::{}", product, v)),
            _ => Self(product.as_str().to_string()),
        }
    }
}
