//! Category facets, slugs and category pages.

use crate::catalog::listing::ProductSummary;
use crate::catalog::upstream::{text, RawCategory};
use serde::Serialize;
use serde_json::Value;

/// Turn a category name into a URL slug.
///
/// ```
/// use woodie_commerce::catalog::slugify;
/// assert_eq!(slugify(" Kitchen & Dining "), "kitchen-and-dining");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase().replace('&', "and");
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Parse a `categoryP=slug1,slug2` value.
pub fn parse_category_param(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build a `categoryP` value from category names. `None` when nothing is selected.
pub fn format_category_param<S: AsRef<str>>(names: &[S]) -> Option<String> {
    let mut slugs: Vec<String> = Vec::new();
    for slug in names.iter().map(|n| slugify(n.as_ref())) {
        if !slug.is_empty() && !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    (!slugs.is_empty()).then(|| slugs.join(","))
}

/// Map `categoryP` slugs back to facet names.
pub fn categories_from_param(value: &str, facets: &[String]) -> Vec<String> {
    let slugs = parse_category_param(value);
    facets
        .iter()
        .filter(|name| slugs.contains(&slugify(name)))
        .cloned()
        .collect()
}

/// Names of the enabled top-level categories, de-duplicated in order.
pub fn active_categories(categories: &[RawCategory]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for category in categories {
        if category.status != Value::Bool(true) {
            continue;
        }
        if let Some(name) = text(&category.parent_category) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Categories to offer as listing filters.
///
/// Enabled categories that at least one product belongs to. When none
/// overlap, the categories found on products are used instead.
pub fn facet_categories(active: &[String], products: &[ProductSummary]) -> Vec<String> {
    let mut on_products: Vec<String> = Vec::new();
    for name in products.iter().filter_map(|p| p.category.as_ref()) {
        if !on_products.contains(name) {
            on_products.push(name.clone());
        }
    }

    let overlap: Vec<String> = active
        .iter()
        .filter(|c| on_products.contains(c))
        .cloned()
        .collect();

    if overlap.is_empty() {
        on_products
    } else {
        overlap
    }
}

/// Products under one category slug.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub slug: String,
    /// Heading: the first product's category name, or the slug spelled out.
    pub name: String,
    pub products: Vec<ProductSummary>,
}

impl CategoryPage {
    /// Select the products whose category path equals `slug`.
    pub fn build(slug: &str, products: &[ProductSummary]) -> Self {
        let products: Vec<ProductSummary> = products
            .iter()
            .filter(|p| p.category_path.as_deref() == Some(slug))
            .cloned()
            .collect();
        let name = products
            .first()
            .and_then(|p| p.category.clone())
            .unwrap_or_else(|| slug.replace('-', " "));
        Self {
            slug: slug.to_string(),
            name,
            products,
        }
    }

    /// Check if the category has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
