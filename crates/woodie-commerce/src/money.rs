//! Money type for representing taka amounts.
//!
//! Amounts are held in poisha (1/100 taka) as integers so subtotals never
//! drift. On the wire, and in the persisted cart, money is a plain JSON
//! number in taka (`650`, `12.5`), the format the commerce API uses.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Taka sign used in listings.
pub const SYMBOL: &str = "\u{09f3}";

/// Poisha per taka.
pub const POISHA_PER_TAKA: i64 = 100;

/// A taka amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in poisha.
    pub amount_poisha: i64,
}

impl Money {
    /// Zero taka.
    pub const ZERO: Money = Money { amount_poisha: 0 };

    /// Create a new Money value from poisha.
    pub const fn new(amount_poisha: i64) -> Self {
        Self { amount_poisha }
    }

    /// Create a Money value from whole taka.
    pub const fn from_taka(taka: i64) -> Self {
        Self::new(taka.saturating_mul(POISHA_PER_TAKA))
    }

    /// Create a Money value from a decimal taka amount.
    ///
    /// Non-finite input yields zero.
    ///
    /// ```
    /// use woodie_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_poisha, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::ZERO;
        }
        Self::new((amount * POISHA_PER_TAKA as f64).round() as i64)
    }

    /// Parse user input such as `"650"` or `" 12.5 "`.
    ///
    /// Returns `None` for empty or non-numeric input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self::from_decimal)
    }

    /// Read an amount from a loosely typed API field (number or numeric string).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(Self::from_decimal),
            serde_json::Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_poisha == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_poisha > 0
    }

    /// Clamp negative amounts to zero.
    pub fn non_negative(self) -> Self {
        Self::new(self.amount_poisha.max(0))
    }

    /// Convert to a decimal taka value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_poisha as f64 / POISHA_PER_TAKA as f64
    }

    fn is_whole(&self) -> bool {
        self.amount_poisha % POISHA_PER_TAKA == 0
    }

    /// Format without symbol: `"650"` for whole taka, `"12.50"` otherwise.
    pub fn display_amount(&self) -> String {
        if self.is_whole() {
            format!("{}", self.amount_poisha / POISHA_PER_TAKA)
        } else {
            format!("{:.2}", self.to_decimal())
        }
    }

    /// Format for listings and the cart (e.g., `"৳650"`).
    pub fn display(&self) -> String {
        format!("{}{}", SYMBOL, self.display_amount())
    }

    /// Format for detail views (e.g., `"TK 650.00"`).
    pub fn display_fixed(&self) -> String {
        format!("TK {:.2}", self.to_decimal())
    }

    /// Add, saturating at the numeric bounds.
    pub fn saturating_add(self, other: Money) -> Money {
        Money::new(self.amount_poisha.saturating_add(other.amount_poisha))
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn times(self, quantity: u32) -> Money {
        Money::new(self.amount_poisha.saturating_mul(i64::from(quantity)))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        self.times(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.amount_poisha / POISHA_PER_TAKA)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a taka amount as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_taka(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::from_taka(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_decimal(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_from_taka() {
        assert_eq!(Money::from_taka(650).amount_poisha, 65_000);
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(12.5).amount_poisha, 1250);
        assert_eq!(Money::from_decimal(f64::NAN), Money::ZERO);
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(Money::parse(" 100 "), Some(Money::from_taka(100)));
        assert_eq!(Money::parse("12.75"), Some(Money::new(1275)));
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("inf"), None);
    }

    #[test]
    fn test_money_from_json() {
        assert_eq!(Money::from_json(&json!(650)), Some(Money::from_taka(650)));
        assert_eq!(Money::from_json(&json!("650")), Some(Money::from_taka(650)));
        assert_eq!(Money::from_json(&json!(null)), None);
        assert_eq!(Money::from_json(&json!([1])), None);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_taka(650).display(), "\u{09f3}650");
        assert_eq!(Money::new(1250).display(), "\u{09f3}12.50");
        assert_eq!(Money::from_taka(650).display_fixed(), "TK 650.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_taka(100);
        let b = Money::from_taka(50);
        assert_eq!(a + b, Money::from_taka(150));
        assert_eq!(a * 3, Money::from_taka(300));
        assert_eq!(Money::new(i64::MAX) + a, Money::new(i64::MAX));
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [Money::from_taka(200), Money::from_taka(150)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_taka(350));
    }

    #[test]
    fn test_money_serializes_as_number() {
        assert_eq!(serde_json::to_value(Money::from_taka(650)).unwrap(), json!(650));
        assert_eq!(serde_json::to_value(Money::new(1250)).unwrap(), json!(12.5));
    }

    #[test]
    fn test_money_deserializes_numbers_and_strings() {
        let m: Money = serde_json::from_value(json!(650)).unwrap();
        assert_eq!(m, Money::from_taka(650));
        let m: Money = serde_json::from_value(json!(12.5)).unwrap();
        assert_eq!(m, Money::new(1250));
        let m: Money = serde_json::from_value(json!("99")).unwrap();
        assert_eq!(m, Money::from_taka(99));
        assert!(serde_json::from_value::<Money>(json!("nope")).is_err());
    }
}
