//! Delivery areas and their flat fees.

use crate::money::Money;
use serde::Serialize;

/// A delivery zone with a flat fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryArea {
    /// Form value, e.g. `inside_dhaka`.
    pub code: &'static str,
    pub label: &'static str,
    pub fee: Money,
}

/// Areas offered at checkout. The first is preselected.
pub static DELIVERY_AREAS: [DeliveryArea; 3] = [
    DeliveryArea {
        code: "inside_dhaka",
        label: "Inside Dhaka City (ঢাকা সিটির ভিতর)",
        fee: Money::from_taka(100),
    },
    DeliveryArea {
        code: "outside_dhaka",
        label: "Outside Dhaka City (সাভার, আশুলিয়া, কেরানীগঞ্জ)",
        fee: Money::from_taka(130),
    },
    DeliveryArea {
        code: "others",
        label: "Others (অন্যান্য জেলা)",
        fee: Money::from_taka(150),
    },
];

impl DeliveryArea {
    /// All areas in display order.
    pub fn all() -> &'static [DeliveryArea] {
        &DELIVERY_AREAS
    }

    /// The preselected area.
    pub fn default_area() -> &'static DeliveryArea {
        &DELIVERY_AREAS[0]
    }

    /// Look up an area by code.
    pub fn find(code: &str) -> Option<&'static DeliveryArea> {
        DELIVERY_AREAS.iter().find(|a| a.code == code)
    }

    /// Look up an area, falling back to the default for unknown or missing codes.
    pub fn find_or_default(code: Option<&str>) -> &'static DeliveryArea {
        code.and_then(Self::find).unwrap_or_else(Self::default_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fees() {
        assert_eq!(DeliveryArea::find("inside_dhaka").unwrap().fee, Money::from_taka(100));
        assert_eq!(DeliveryArea::find("outside_dhaka").unwrap().fee, Money::from_taka(130));
        assert_eq!(DeliveryArea::find("others").unwrap().fee, Money::from_taka(150));
    }

    #[test]
    fn test_default_area() {
        assert_eq!(DeliveryArea::default_area().code, "inside_dhaka");
        assert_eq!(DeliveryArea::find_or_default(Some("moon")).code, "inside_dhaka");
        assert_eq!(DeliveryArea::find_or_default(None).code, "inside_dhaka");
        assert_eq!(DeliveryArea::find_or_default(Some("others")).code, "others");
    }
}
