//! Cart lines and the items that create them.

use crate::cart::Quantity;
use crate::ids::{LineId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Image shown when a product has none.
pub const DEFAULT_IMAGE: &str = "/product/11.jpg";

/// One purchasable unit in the cart.
///
/// Field names on the wire match the persisted cart layout
/// (`id`, `title`, `price`, `oldPrice`, `img`, `qty`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Unique key within the cart.
    pub id: LineId,
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Unit sale price captured when the line was created.
    #[serde(default)]
    pub price: Money,
    /// "Was" price, display only.
    #[serde(default, rename = "oldPrice")]
    pub old_price: Money,
    /// Display image.
    #[serde(default, rename = "img")]
    pub image: String,
    /// Units of this item, never below 1.
    #[serde(default, rename = "qty")]
    pub quantity: Quantity,
    /// Variant the line was resolved to, if any.
    #[serde(default, rename = "variantId", skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
}

impl CartLine {
    /// Price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity.get())
    }

    /// Image to render, falling back to the placeholder.
    pub fn display_image(&self) -> &str {
        if self.image.trim().is_empty() {
            DEFAULT_IMAGE
        } else {
            &self.image
        }
    }
}

/// The product fields snapshotted into a new cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Line key. An empty id makes `add_to_cart` a no-op.
    pub id: LineId,
    pub title: String,
    pub price: Money,
    pub old_price: Money,
    pub image: String,
    pub variant_id: Option<VariantId>,
}

impl CartItem {
    /// Create an item with a title and unit price.
    pub fn new(id: impl Into<LineId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            old_price: price,
            image: String::new(),
            variant_id: None,
        }
    }

    /// Set the "was" price.
    pub fn with_old_price(mut self, old_price: Money) -> Self {
        self.old_price = old_price;
        self
    }

    /// Set the display image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Record the resolved variant.
    pub fn with_variant(mut self, variant_id: VariantId) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    pub(crate) fn to_line(&self, quantity: Quantity) -> CartLine {
        CartLine {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            old_price: self.old_price,
            image: self.image.clone(),
            quantity,
            variant_id: self.variant_id.clone(),
        }
    }
}
