//! Product listings: summaries, filters and sorting.

use crate::cart::{CartItem, DEFAULT_IMAGE};
use crate::catalog::product::price_field;
use crate::catalog::upstream::{first_text, text, truthy, RawProduct};
use crate::ids::ProductId;
use crate::money::Money;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A product card in a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub old_price: Money,
    /// e.g. `"15% off"`.
    pub discount_label: Option<String>,
    pub image: String,
    pub category: Option<String>,
    pub category_path: Option<String>,
}

impl ProductSummary {
    /// Summarize an API record. Records with neither `path` nor `_id` are skipped.
    pub fn from_raw(raw: &RawProduct) -> Option<Self> {
        let id = raw.slug()?;
        Some(Self {
            id: ProductId::new(id),
            title: text(&raw.name).unwrap_or_else(|| super::product::DEFAULT_TITLE.to_string()),
            price: price_field(&raw.sale_price),
            old_price: price_field(&raw.product_price),
            discount_label: listing_discount(&raw.discount),
            image: first_text(&raw.image_urls).unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            category: first_text(&raw.category),
            category_path: first_text(&raw.category_path),
        })
    }

    /// Summarize a list of records, dropping unusable ones.
    pub fn from_raw_list(raw: &[RawProduct]) -> Vec<Self> {
        raw.iter().filter_map(Self::from_raw).collect()
    }

    /// Cart item for the listing's quick-add button.
    pub fn cart_item(&self) -> CartItem {
        CartItem::new(self.id.as_str(), self.title.clone(), self.price)
            .with_old_price(self.old_price)
            .with_image(self.image.clone())
    }

    /// Detail page link.
    pub fn href(&self) -> String {
        format!("/product/{}", self.id)
    }
}

fn listing_discount(value: &Value) -> Option<String> {
    if !truthy(value) {
        return None;
    }
    match value {
        Value::Number(n) => Some(format!("{}% off", n)),
        Value::String(s) => Some(format!("{}% off", s)),
        _ => None,
    }
}

/// Find a record by slug, falling back to `_id`.
pub fn find_product<'a>(products: &'a [RawProduct], id: &str) -> Option<&'a RawProduct> {
    products
        .iter()
        .find(|p| text(&p.path).as_deref() == Some(id))
        .or_else(|| {
            products
                .iter()
                .find(|p| text(&p.record_id).as_deref() == Some(id))
        })
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortOrder {
    #[default]
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price-asc" | "asc" => Ok(SortOrder::PriceAsc),
            "price-desc" | "desc" => Ok(SortOrder::PriceDesc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Filters applied to the full product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    /// Keep products in any of these categories. Empty keeps all.
    pub categories: Vec<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub sort: SortOrder,
}

impl ListingQuery {
    /// Default query: everything, cheapest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a category in the selection.
    pub fn toggle_category(&mut self, name: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == name) {
            self.categories.remove(pos);
        } else {
            self.categories.push(name.to_string());
        }
    }

    /// Builder-style category selection.
    pub fn with_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = names.into_iter().map(Into::into).collect();
        self
    }

    /// Apply price bounds typed by the shopper. Blank or non-numeric bounds are ignored.
    pub fn with_price_bounds(mut self, min: &str, max: &str) -> Self {
        self.min_price = Money::parse(min);
        self.max_price = Money::parse(max);
        self
    }

    /// Set the sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Drop selected categories that are no longer offered.
    pub fn retain_known_categories(&mut self, facets: &[String]) {
        self.categories.retain(|c| facets.contains(c));
    }

    /// Reset every filter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Filter and sort. Equal prices keep their original order.
    pub fn apply(&self, products: &[ProductSummary]) -> Vec<ProductSummary> {
        let mut list: Vec<ProductSummary> = products
            .iter()
            .filter(|p| {
                self.categories.is_empty()
                    || p.category
                        .as_ref()
                        .is_some_and(|c| self.categories.contains(c))
            })
            .filter(|p| self.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| self.max_price.map_or(true, |max| p.price <= max))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::PriceAsc => list.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => list.sort_by(|a, b| b.price.cmp(&a.price)),
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(record: Value) -> RawProduct {
        RawProduct::from_value(&record)
    }

    fn catalog() -> Vec<ProductSummary> {
        ProductSummary::from_raw_list(&[
            raw(json!({ "path": "bowl", "salePrice": 300, "category": ["Kitchen"] })),
            raw(json!({ "path": "frame", "salePrice": 900, "category": ["Decor"] })),
            raw(json!({ "path": "spoon", "salePrice": 120, "category": ["Kitchen"] })),
            raw(json!({ "path": "clock", "salePrice": "450", "category": ["Decor"] })),
            raw(json!({ "name": "no id" })),
        ])
    }

    fn ids(list: &[ProductSummary]) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_summary_from_raw() {
        let s = ProductSummary::from_raw(&raw(json!({
            "_id": "64f",
            "path": "teak-bowl",
            "name": "Teak Bowl",
            "salePrice": 300,
            "productPrice": 400,
            "discount": 25,
            "imageURLs": ["/bowl.jpg"],
            "category": ["Kitchen"],
            "categoryPath": ["kitchen"]
        })))
        .unwrap();
        assert_eq!(s.id.as_str(), "teak-bowl");
        assert_eq!(s.discount_label.as_deref(), Some("25% off"));
        assert_eq!(s.image, "/bowl.jpg");
        assert_eq!(s.category_path.as_deref(), Some("kitchen"));
        assert_eq!(s.href(), "/product/teak-bowl");
    }

    #[test]
    fn test_summary_defaults() {
        let s = ProductSummary::from_raw(&raw(json!({ "_id": "64f", "discount": 0 }))).unwrap();
        assert_eq!(s.title, "Product");
        assert_eq!(s.image, DEFAULT_IMAGE);
        assert!(s.discount_label.is_none());
        assert!(s.category.is_none());
    }

    #[test]
    fn test_records_without_id_are_dropped() {
        assert_eq!(catalog().len(), 4);
    }

    #[test]
    fn test_default_sort_is_price_ascending() {
        let list = ListingQuery::new().apply(&catalog());
        assert_eq!(ids(&list), vec!["spoon", "bowl", "clock", "frame"]);
    }

    #[test]
    fn test_sort_descending() {
        let list = ListingQuery::new()
            .with_sort(SortOrder::PriceDesc)
            .apply(&catalog());
        assert_eq!(ids(&list), vec!["frame", "clock", "bowl", "spoon"]);
    }

    #[test]
    fn test_category_filter() {
        let list = ListingQuery::new()
            .with_categories(["Decor"])
            .apply(&catalog());
        assert_eq!(ids(&list), vec!["clock", "frame"]);
    }

    #[test]
    fn test_price_bounds() {
        let list = ListingQuery::new()
            .with_price_bounds("200", "500")
            .apply(&catalog());
        assert_eq!(ids(&list), vec!["bowl", "clock"]);
    }

    #[test]
    fn test_bad_price_bounds_are_ignored() {
        let list = ListingQuery::new()
            .with_price_bounds("cheap", "")
            .apply(&catalog());
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_toggle_and_retain_categories() {
        let mut query = ListingQuery::new();
        query.toggle_category("Kitchen");
        query.toggle_category("Garden");
        query.toggle_category("Garden");
        assert_eq!(query.categories, vec!["Kitchen"]);

        query.toggle_category("Gone");
        query.retain_known_categories(&["Kitchen".to_string()]);
        assert_eq!(query.categories, vec!["Kitchen"]);

        query.clear();
        assert_eq!(query, ListingQuery::new());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-desc".parse::<SortOrder>().unwrap(), SortOrder::PriceDesc);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert!("newest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_find_product_prefers_path() {
        let records = vec![
            raw(json!({ "_id": "shared", "path": "first" })),
            raw(json!({ "_id": "x", "path": "shared" })),
        ];
        assert_eq!(
            find_product(&records, "shared").and_then(|p| p.slug()).as_deref(),
            Some("shared")
        );
        assert_eq!(
            find_product(&records, "x").and_then(|p| p.slug()).as_deref(),
            Some("shared")
        );
        assert!(find_product(&records, "nope").is_none());
    }

    #[test]
    fn test_quick_add_item() {
        let list = catalog();
        let item = list[0].cart_item();
        assert_eq!(item.id.as_str(), "bowl");
        assert_eq!(item.price, Money::from_taka(300));
    }
}
