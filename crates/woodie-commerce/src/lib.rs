//! Storefront domain types and logic for the Woodie wooden-crafts shop.
//!
//! This crate holds everything the storefront client computes locally:
//!
//! - **Cart**: the persisted cart store with quantity merge logic
//! - **Catalog**: products normalized from the commerce API, variant
//!   resolution, categories, listing filters
//! - **Checkout**: delivery areas and the order summary
//!
//! Remote data arrives as raw JSON records (see [`catalog::upstream`]); nothing
//! here performs I/O except through the injected [`cart::CartStorage`].
//!
//! # Example
//!
//! ```rust
//! use woodie_commerce::prelude::*;
//!
//! let mut cart = CartStore::load(MemoryCartStorage::new());
//! let chair = CartItem::new("teak-chair", "Teak Chair", Money::from_taka(100));
//!
//! cart.add_to_cart(&chair, 2);
//! cart.add_to_cart(&chair, 1);
//!
//! assert_eq!(cart.total_count(), 3);
//! assert_eq!(cart.subtotal(), Money::from_taka(300));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{
        CartItem, CartLine, CartStorage, CartStore, MemoryCartStorage, Quantity,
        CART_STORAGE_KEY,
    };
    #[cfg(feature = "storage")]
    pub use crate::cart::KvCartStorage;

    // Catalog
    pub use crate::catalog::{
        AttributeOption, AttributeSelection, CategoryRef, PriceDisplay, Product,
        ProductSummary, ProductVariant, SortOrder, StockStatus, VariantIndex,
    };

    // Checkout
    pub use crate::checkout::{CheckoutLine, DeliveryArea, OrderSummary};
}
