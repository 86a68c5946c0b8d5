//! Product catalog: API records, product detail, variants, listings, categories.

mod attributes;
mod category;
mod listing;
mod product;
pub mod resolver;
pub mod upstream;

pub use attributes::{attribute_text, AttributeOption, AttributeSelection};
pub use category::{
    active_categories, categories_from_param, facet_categories, format_category_param,
    parse_category_param, slugify, CategoryPage,
};
pub use listing::{find_product, ListingQuery, ProductSummary, SortOrder};
pub use product::{CategoryRef, PriceDisplay, Product, ProductVariant, StockStatus, DEFAULT_TITLE};
pub use resolver::{default_selection, resolve_variant, VariantIndex};
pub use upstream::{
    categories_from_envelope, product_from_envelope, PageMeta, ProductPage, RawCategory,
    RawProduct, RawVariant,
};
