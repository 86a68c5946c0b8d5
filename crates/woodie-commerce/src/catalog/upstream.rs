//! Raw records as served by the commerce API.
//!
//! The API is loosely typed: prices arrive as numbers or strings, lists may
//! be missing, and flags may be any truthy value. Everything is captured as
//! [`serde_json::Value`] here and interpreted by the normalizers in
//! [`product`](super::product) and [`listing`](super::listing).

use serde::Deserialize;
use serde_json::Value;

/// A product record from `/product/website` or `/product/path/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProduct {
    #[serde(rename = "_id")]
    pub record_id: Value,
    pub path: Value,
    pub name: Value,
    pub sku: Value,
    #[serde(rename = "salePrice")]
    pub sale_price: Value,
    #[serde(rename = "productPrice")]
    pub product_price: Value,
    pub discount: Value,
    #[serde(rename = "imageURLs")]
    pub image_urls: Value,
    pub category: Value,
    #[serde(rename = "categoryPath")]
    pub category_path: Value,
    pub stock: Value,
    pub description: Value,
    pub review: Value,
    pub youtube: Value,
    /// Attribute name to allowed values, in declaration order.
    pub attributes: Value,
    pub variant: Value,
}

impl RawProduct {
    /// Parse a record, treating anything that is not an object as empty.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// `path` when present, otherwise `_id`.
    pub fn slug(&self) -> Option<String> {
        text(&self.path).or_else(|| text(&self.record_id))
    }
}

/// A variant entry from a product's `variant` list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVariant {
    #[serde(rename = "_id")]
    pub record_id: Value,
    pub attributes: Value,
    #[serde(rename = "salePrice")]
    pub sale_price: Value,
    #[serde(rename = "productPrice")]
    pub product_price: Value,
    pub discount: Value,
}

/// A category record from `/category/website/{store}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    pub status: Value,
    #[serde(rename = "parentCategory")]
    pub parent_category: Value,
}

/// Pagination block of a products page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    /// Total products across all pages.
    pub total: u64,
    /// Page size the server used.
    pub limit: u64,
}

impl PageMeta {
    /// `ceil(total / limit)`, or 1 when the limit is zero.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(self.limit)
    }
}

/// One page of `/product/website`.
#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    pub products: Vec<RawProduct>,
    pub meta: Option<PageMeta>,
}

impl ProductPage {
    /// Read the `{ data: { data: [...], meta: { total, limit } } }` envelope.
    ///
    /// Missing parts become an empty page.
    pub fn from_envelope(body: &Value) -> Self {
        let data = &body["data"];
        let products: Vec<RawProduct> = data["data"]
            .as_array()
            .map(|items| items.iter().map(RawProduct::from_value).collect())
            .unwrap_or_default();

        let meta = data.get("meta").filter(|m| m.is_object()).map(|m| PageMeta {
            total: number(&m["total"]).unwrap_or(products.len() as u64),
            limit: number(&m["limit"]).unwrap_or(10),
        });

        Self { products, meta }
    }

    /// Pagination for this page. A page without `meta` counts only itself.
    pub fn page_meta(&self) -> PageMeta {
        self.meta.unwrap_or(PageMeta {
            total: self.products.len() as u64,
            limit: 10,
        })
    }
}

/// Read the `{ data: [...] }` envelope of the categories endpoint.
pub fn categories_from_envelope(body: &Value) -> Vec<RawCategory> {
    body["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|c| serde_json::from_value(c.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Read the `{ data: {...} }` envelope of the product-by-path endpoint.
pub fn product_from_envelope(body: &Value) -> Option<RawProduct> {
    let data = body.get("data")?;
    if !data.is_object() {
        return None;
    }
    Some(RawProduct::from_value(data))
}

/// Non-empty string content of a field. Numbers are rendered as text.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty string of an array field.
pub(crate) fn first_text(value: &Value) -> Option<String> {
    value.as_array()?.first().and_then(text)
}

/// JavaScript-style truthiness of a field.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
