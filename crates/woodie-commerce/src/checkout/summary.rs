//! Order summaries shown at checkout.
//!
//! A summary is derived on demand from either the whole cart or a single
//! "buy now" product. It is never persisted or submitted.

use crate::cart::{CartItem, CartLine, Quantity};
use crate::catalog::{AttributeSelection, Product, RawProduct};
use crate::checkout::DeliveryArea;
use crate::ids::LineId;
use crate::money::Money;
use serde::Serialize;
use std::str::FromStr;

/// Where the summary's lines came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    Cart,
    BuyNow,
}

/// How the shopper intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Online,
}

impl PaymentMethod {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Online => "Online Payment",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cod" | "cash" | "cash_on_delivery" => Ok(PaymentMethod::CashOnDelivery),
            "online" => Ok(PaymentMethod::Online),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutLine {
    pub id: LineId,
    pub title: String,
    pub image: String,
    pub price: Money,
    pub old_price: Money,
    pub quantity: Quantity,
    pub line_total: Money,
}

impl CheckoutLine {
    fn from_cart_line(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            title: line.title.clone(),
            image: line.display_image().to_string(),
            price: line.price,
            old_price: line.old_price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// Lines, delivery fee and totals: `subtotal + delivery_fee = total`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub mode: CheckoutMode,
    pub lines: Vec<CheckoutLine>,
    pub area: DeliveryArea,
    pub payment: PaymentMethod,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Summarize the cart's lines.
    pub fn from_cart(lines: &[CartLine], area: &DeliveryArea) -> Self {
        let lines = lines.iter().map(CheckoutLine::from_cart_line).collect();
        Self::assemble(CheckoutMode::Cart, lines, area)
    }

    /// Summarize a single buy-now purchase.
    pub fn buy_now(buy: &BuyNow, area: &DeliveryArea) -> Self {
        let line = buy.item.to_line(buy.quantity);
        let lines = vec![CheckoutLine::from_cart_line(&line)];
        Self::assemble(CheckoutMode::BuyNow, lines, area)
    }

    fn assemble(mode: CheckoutMode, lines: Vec<CheckoutLine>, area: &DeliveryArea) -> Self {
        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        Self {
            mode,
            lines,
            area: *area,
            payment: PaymentMethod::default(),
            subtotal,
            delivery_fee: area.fee,
            total: subtotal + area.fee,
        }
    }

    /// Choose the payment method shown on the summary.
    pub fn with_payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = payment;
        self
    }

    /// Check if there is nothing to order.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }
}

/// A single product bought directly, bypassing the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyNow {
    pub item: CartItem,
    pub quantity: Quantity,
}

impl BuyNow {
    /// Build from a product-by-path record and the `qty` query value.
    ///
    /// The item id is the record's slug, or `requested_id` when it has none.
    pub fn from_raw(raw: &RawProduct, requested_id: &str, qty: Option<&str>) -> Self {
        let product = Product::from_raw_or(raw, requested_id);
        Self {
            item: product.cart_item(&AttributeSelection::new()),
            quantity: Quantity::from_query(qty),
        }
    }

    /// One more unit.
    pub fn increment(&mut self) {
        self.quantity = self.quantity.increment();
    }

    /// One fewer unit, never below 1.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.decrement();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartStore, MemoryCartStorage, DEFAULT_IMAGE};
    use serde_json::json;

    #[test]
    fn test_cart_summary_totals() {
        let mut cart = CartStore::load(MemoryCartStorage::new());
        cart.add_to_cart(&CartItem::new("a", "A", Money::from_taka(100)), 2);
        cart.add_to_cart(&CartItem::new("b", "B", Money::from_taka(50)), 3);

        let area = DeliveryArea::find("outside_dhaka").unwrap();
        let summary = OrderSummary::from_cart(cart.lines(), area);

        assert_eq!(summary.mode, CheckoutMode::Cart);
        assert_eq!(summary.subtotal, Money::from_taka(350));
        assert_eq!(summary.delivery_fee, Money::from_taka(130));
        assert_eq!(summary.total, Money::from_taka(480));
        assert_eq!(summary.item_count(), 5);
        assert_eq!(summary.lines[0].line_total, Money::from_taka(200));
        assert_eq!(summary.lines[0].image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_empty_cart_summary_still_charges_delivery() {
        let summary = OrderSummary::from_cart(&[], DeliveryArea::default_area());
        assert!(summary.is_empty());
        assert_eq!(summary.total, Money::from_taka(100));
    }

    #[test]
    fn test_buy_now_summary() {
        let raw = RawProduct::from_value(&json!({
            "_id": "64f",
            "name": "Wall Clock",
            "salePrice": 450,
            "productPrice": 600
        }));
        let mut buy = BuyNow::from_raw(&raw, "wall-clock", Some("2"));
        assert_eq!(buy.item.id.as_str(), "64f");
        assert_eq!(buy.item.image, DEFAULT_IMAGE);

        buy.increment();
        let summary = OrderSummary::buy_now(&buy, DeliveryArea::find("others").unwrap());
        assert_eq!(summary.mode, CheckoutMode::BuyNow);
        assert_eq!(summary.lines[0].quantity.get(), 3);
        assert_eq!(summary.subtotal, Money::from_taka(1350));
        assert_eq!(summary.total, Money::from_taka(1500));
    }

    #[test]
    fn test_buy_now_quantity_from_query() {
        let raw = RawProduct::default();
        assert_eq!(BuyNow::from_raw(&raw, "x", Some("abc")).quantity.get(), 1);
        assert_eq!(BuyNow::from_raw(&raw, "x", Some("-2")).quantity.get(), 1);
        assert_eq!(BuyNow::from_raw(&raw, "x", None).quantity.get(), 1);

        let mut buy = BuyNow::from_raw(&raw, "x", Some("1"));
        assert_eq!(buy.item.id.as_str(), "x");
        buy.decrement();
        assert_eq!(buy.quantity.get(), 1);
    }

    #[test]
    fn test_payment_method() {
        let summary = OrderSummary::from_cart(&[], DeliveryArea::default_area())
            .with_payment(PaymentMethod::Online);
        assert_eq!(summary.payment.label(), "Online Payment");
        assert_eq!(PaymentMethod::default(), PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("cod".parse(), Ok(PaymentMethod::CashOnDelivery));
        assert_eq!(" Online ".parse(), Ok(PaymentMethod::Online));
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
