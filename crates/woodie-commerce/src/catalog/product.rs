//! Product detail types and their normalization from API records.

use crate::cart::{CartItem, DEFAULT_IMAGE};
use crate::catalog::attributes::{attribute_map, attribute_options, AttributeOption};
use crate::catalog::resolver;
use crate::catalog::upstream::{first_text, text, truthy, RawProduct, RawVariant};
use crate::catalog::AttributeSelection;
use crate::error::CommerceError;
use crate::ids::{LineId, ProductId, VariantId};
use crate::money::Money;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Title used when a record has no name.
pub const DEFAULT_TITLE: &str = "Product";

/// Availability shown on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

/// A product's primary category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub name: String,
    /// URL slug, possibly empty.
    pub path: String,
}

impl CategoryRef {
    /// Link to the category page, or `#` when the slug is unknown.
    pub fn href(&self) -> String {
        if self.path.is_empty() {
            "#".to_string()
        } else {
            format!("/category/{}", self.path)
        }
    }
}

/// A priced combination of attribute values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductVariant {
    pub id: Option<VariantId>,
    /// Attribute values in string form.
    pub attributes: BTreeMap<String, String>,
    pub price: Option<Money>,
    pub old_price: Option<Money>,
    pub discount_label: Option<String>,
}

impl ProductVariant {
    /// The variant's value for an attribute, if it declares one.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn from_raw(raw: &RawVariant) -> Self {
        Self {
            id: text(&raw.record_id).map(VariantId::new),
            attributes: attribute_map(&raw.attributes),
            price: Money::from_json(&raw.sale_price).map(Money::non_negative),
            old_price: Money::from_json(&raw.product_price).map(Money::non_negative),
            discount_label: discount_label(&raw.discount),
        }
    }
}

/// Prices to show for a product under a given selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDisplay {
    pub price: Money,
    pub old_price: Money,
    pub discount_label: Option<String>,
    /// Set when a variant matched.
    pub variant_id: Option<VariantId>,
    pub matched: bool,
}

/// A product as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub sku: Option<String>,
    pub price: Money,
    pub old_price: Money,
    pub discount_label: Option<String>,
    /// Never empty: falls back to the placeholder image.
    pub images: Vec<String>,
    pub attributes: Vec<AttributeOption>,
    pub variants: Vec<ProductVariant>,
    pub category: Option<CategoryRef>,
    pub stock: StockStatus,
    pub description_html: String,
    pub review_count: usize,
    pub youtube: Option<String>,
}

impl Product {
    /// Normalize an API record.
    ///
    /// Fails only when the record has neither `path` nor `_id`.
    pub fn from_raw(raw: &RawProduct) -> Result<Self, CommerceError> {
        let id = raw.slug().ok_or_else(|| CommerceError::MalformedRecord {
            kind: "product",
            message: "missing both path and _id".to_string(),
        })?;
        Ok(Self::from_raw_with_id(raw, ProductId::new(id)))
    }

    /// Normalize an API record, using `fallback_id` when it has no slug.
    pub fn from_raw_or(raw: &RawProduct, fallback_id: &str) -> Self {
        let id = raw.slug().unwrap_or_else(|| fallback_id.to_string());
        Self::from_raw_with_id(raw, ProductId::new(id))
    }

    fn from_raw_with_id(raw: &RawProduct, id: ProductId) -> Self {
        let images: Vec<String> = raw
            .image_urls
            .as_array()
            .map(|urls| urls.iter().filter_map(text).collect())
            .unwrap_or_default();
        let images = if images.is_empty() {
            vec![DEFAULT_IMAGE.to_string()]
        } else {
            images
        };

        let category = first_text(&raw.category).map(|name| CategoryRef {
            name,
            path: first_text(&raw.category_path).unwrap_or_default(),
        });

        let variants = raw
            .variant
            .as_array()
            .map(|vs| {
                vs.iter()
                    .filter(|v| v.is_object())
                    .map(|v| {
                        let raw: RawVariant = serde_json::from_value(v.clone()).unwrap_or_default();
                        ProductVariant::from_raw(&raw)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id,
            title: text(&raw.name).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            sku: text(&raw.sku),
            price: price_field(&raw.sale_price),
            old_price: price_field(&raw.product_price),
            discount_label: discount_label(&raw.discount),
            images,
            attributes: attribute_options(&raw.attributes),
            variants,
            category,
            stock: if truthy(&raw.stock) {
                StockStatus::InStock
            } else {
                StockStatus::OutOfStock
            },
            description_html: text(&raw.description).unwrap_or_default(),
            review_count: raw.review.as_array().map(Vec::len).unwrap_or(0),
            youtube: text(&raw.youtube),
        }
    }

    /// Attribute names a selection must cover, in declaration order.
    pub fn required_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Attributes that offer at least one value to pick.
    pub fn selectable_attributes(&self) -> impl Iterator<Item = &AttributeOption> {
        self.attributes.iter().filter(|a| a.is_selectable())
    }

    /// First image.
    pub fn primary_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or(DEFAULT_IMAGE)
    }

    /// The first variant's values for the required attributes.
    pub fn default_selection(&self) -> AttributeSelection {
        resolver::default_selection(self)
    }

    /// Variant matching a complete selection.
    pub fn resolve(&self, selection: &AttributeSelection) -> Option<&ProductVariant> {
        resolver::resolve_variant(self, selection)
    }

    /// Prices under a selection; base prices when no variant matches.
    pub fn pricing(&self, selection: &AttributeSelection) -> PriceDisplay {
        match self.resolve(selection) {
            Some(variant) => PriceDisplay {
                price: variant.price.unwrap_or(self.price),
                old_price: variant.old_price.unwrap_or(self.old_price),
                discount_label: variant
                    .discount_label
                    .clone()
                    .or_else(|| self.discount_label.clone()),
                variant_id: variant.id.clone(),
                matched: true,
            },
            None => PriceDisplay {
                price: self.price,
                old_price: self.old_price,
                discount_label: self.discount_label.clone(),
                variant_id: None,
                matched: false,
            },
        }
    }

    /// The cart item for this product under a selection.
    ///
    /// A matched variant gets its own line id and a title suffixed with the
    /// selected values. Variants without an `_id` are keyed by their
    /// selected values instead.
    pub fn cart_item(&self, selection: &AttributeSelection) -> CartItem {
        let pricing = self.pricing(selection);
        if !pricing.matched {
            let line_id = LineId::for_product(&self.id, None);
            return CartItem::new(line_id, self.title.clone(), pricing.price)
                .with_old_price(pricing.old_price)
                .with_image(self.primary_image());
        }

        let names: Vec<&str> = self.required_attributes().collect();
        let values: Vec<&str> = names.iter().filter_map(|name| selection.get(name)).collect();
        let line_key = match &pricing.variant_id {
            Some(id) if !id.is_blank() => id.clone(),
            _ => VariantId::new(resolver::canonical_key(&names, &values)),
        };

        let title = format!("{} ({})", self.title, values.join(" / "));
        let line_id = LineId::for_product(&self.id, Some(&line_key));
        let mut item = CartItem::new(line_id, title, pricing.price)
            .with_old_price(pricing.old_price)
            .with_image(self.primary_image());
        if let Some(variant_id) = pricing.variant_id {
            item = item.with_variant(variant_id);
        }
        item
    }
}

/// `"{d}% OFF"` for numeric or string discounts.
pub(crate) fn discount_label(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(format!("{}% OFF", n)),
        Value::String(s) if !s.is_empty() => Some(format!("{}% OFF", s)),
        _ => None,
    }
}

/// A price field, defaulting to zero and never negative.
pub(crate) fn price_field(value: &Value) -> Money {
    Money::from_json(value).unwrap_or(Money::ZERO).non_negative()
}
