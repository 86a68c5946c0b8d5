//! Variant resolution.
//!
//! A selection resolves only when it names a value for every declared
//! attribute. The first variant, in list order, whose value for each
//! declared attribute equals the selected value wins. Values are compared
//! in their string form without trimming or case folding.

use crate::catalog::{AttributeSelection, Product, ProductVariant};
use std::collections::HashMap;

/// Find the variant for a selection by scanning the product's variants.
///
/// Returns `None` when the product has no variants, when any declared
/// attribute is unselected, or when no variant carries the selected values.
pub fn resolve_variant<'a>(
    product: &'a Product,
    selection: &AttributeSelection,
) -> Option<&'a ProductVariant> {
    if product.variants.is_empty() {
        return None;
    }
    let required: Vec<&str> = product.required_attributes().collect();
    if required.iter().any(|name| selection.get(name).is_none()) {
        return None;
    }

    product.variants.iter().find(|variant| {
        required
            .iter()
            .all(|name| variant.attribute(name) == selection.get(name))
    })
}

/// Seed a selection from the first variant.
///
/// Only declared attributes the variant actually carries are included.
pub fn default_selection(product: &Product) -> AttributeSelection {
    let Some(first) = product.variants.first() else {
        return AttributeSelection::new();
    };
    product
        .required_attributes()
        .filter_map(|name| {
            first
                .attribute(name)
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect()
}

/// Keyed variant lookup, equivalent to [`resolve_variant`].
///
/// Each variant is keyed by the canonical string of its values for the
/// declared attributes; the first variant per key is kept. Variants that
/// lack a declared attribute can never match and are not indexed.
#[derive(Debug, Clone)]
pub struct VariantIndex<'a> {
    product: &'a Product,
    by_key: HashMap<String, usize>,
}

impl<'a> VariantIndex<'a> {
    /// Index a product's variants.
    pub fn new(product: &'a Product) -> Self {
        let required: Vec<&str> = product.required_attributes().collect();
        let mut by_key = HashMap::new();
        for (position, variant) in product.variants.iter().enumerate() {
            let values: Option<Vec<&str>> =
                required.iter().map(|name| variant.attribute(name)).collect();
            if let Some(values) = values {
                by_key
                    .entry(canonical_key(&required, &values))
                    .or_insert(position);
            }
        }
        Self { product, by_key }
    }

    /// Number of distinct resolvable combinations.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Check if no combination resolves.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Look up the variant for a selection.
    pub fn resolve(&self, selection: &AttributeSelection) -> Option<&'a ProductVariant> {
        let required: Vec<&str> = self.product.required_attributes().collect();
        let values: Option<Vec<&str>> = required.iter().map(|name| selection.get(name)).collect();
        let key = canonical_key(&required, &values?);
        self.by_key
            .get(&key)
            .and_then(|&position| self.product.variants.get(position))
    }
}

/// Length-prefixed `name=value` pairs sorted by name, so distinct
/// selections never share a key.
pub(crate) fn canonical_key(names: &[&str], values: &[&str]) -> String {
    let mut pairs: Vec<(&str, &str)> = names.iter().copied().zip(values.iter().copied()).collect();
    pairs.sort_unstable();
    pairs
        .iter()
        .map(|(n, v)| format!("{}:{}={}:{}", n.len(), n, v.len(), v))
        .collect::<Vec<_>>()
        .join(";")
}
