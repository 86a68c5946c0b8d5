//! Line quantities.
//!
//! A quantity is always at least 1. Every conversion into [`Quantity`]
//! clamps instead of failing: zero, negative, and non-numeric input all
//! become 1.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A cart line quantity, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Quantity = Quantity(1);

    /// Clamp any integer into the valid range.
    pub fn clamped(n: i64) -> Self {
        Self(n.clamp(1, i64::from(u32::MAX)) as u32)
    }

    /// A positive amount to add, or `None` for zero and negative input.
    pub fn positive(n: i64) -> Option<Self> {
        (n > 0).then(|| Self::clamped(n))
    }

    /// Parse free-form input. Non-numeric text becomes 1.
    ///
    /// Decimal input is truncated toward zero before clamping.
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::clamped(n);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => Self::clamped(f.trunc() as i64),
            _ => Self::ONE,
        }
    }

    /// Read a quantity from an optional query-string value, e.g. `?qty=2`.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.map(Self::parse_lenient).unwrap_or(Self::ONE)
    }

    /// Read a quantity from any JSON value.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::clamped(i),
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| Self::clamped(f.trunc() as i64))
                    .unwrap_or(Self::ONE),
            },
            serde_json::Value::String(s) => Self::parse_lenient(s),
            _ => Self::ONE,
        }
    }

    /// The numeric value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Add another quantity, saturating at `u32::MAX`.
    pub fn saturating_add(self, other: Quantity) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// One more.
    pub fn increment(self) -> Self {
        self.saturating_add(Self::ONE)
    }

    /// One fewer, floored at 1.
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Quantity {
    fn from(n: i32) -> Self {
        Self::clamped(i64::from(n))
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Self::clamped(n)
    }
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Self::clamped(i64::from(n))
    }
}

impl From<&str> for Quantity {
    fn from(raw: &str) -> Self {
        Self::parse_lenient(raw)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_clamps_low_values() {
        assert_eq!(Quantity::from(-5).get(), 1);
        assert_eq!(Quantity::from(0).get(), 1);
        assert_eq!(Quantity::from(3).get(), 3);
    }

    #[test]
    fn test_quantity_has_no_upper_cap() {
        assert_eq!(Quantity::clamped(1_000_000).get(), 1_000_000);
        assert_eq!(Quantity::from("20000").get(), 20000);
        assert_eq!(Quantity::clamped(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn test_quantity_positive() {
        assert_eq!(Quantity::positive(3).map(Quantity::get), Some(3));
        assert_eq!(Quantity::positive(0), None);
        assert_eq!(Quantity::positive(-2), None);
    }

    #[test]
    fn test_quantity_parse_lenient() {
        assert_eq!(Quantity::from("abc").get(), 1);
        assert_eq!(Quantity::from("").get(), 1);
        assert_eq!(Quantity::from(" 4 ").get(), 4);
        assert_eq!(Quantity::from("2.9").get(), 2);
        assert_eq!(Quantity::from("-3").get(), 1);
    }

    #[test]
    fn test_quantity_from_query() {
        assert_eq!(Quantity::from_query(None).get(), 1);
        assert_eq!(Quantity::from_query(Some("NaN")).get(), 1);
        assert_eq!(Quantity::from_query(Some("0")).get(), 1);
        assert_eq!(Quantity::from_query(Some("5")).get(), 5);
    }

    #[test]
    fn test_quantity_increment_decrement() {
        let q = Quantity::from(2);
        assert_eq!(q.increment().get(), 3);
        assert_eq!(q.decrement().get(), 1);
        assert_eq!(Quantity::ONE.decrement().get(), 1);
        assert_eq!(Quantity::from(9999).increment().get(), 10000);
        assert_eq!(Quantity::from(u32::MAX).increment().get(), u32::MAX);
    }

    #[test]
    fn test_quantity_deserialize_is_lenient() {
        let q: Quantity = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(q.get(), 3);
        let q: Quantity = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(q.get(), 1);
        let q: Quantity = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(q.get(), 7);
        let q: Quantity = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(q.get(), 1);
    }
}
