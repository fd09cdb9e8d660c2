//! Cost estimation from the static base-cost table

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, COST_ADJUSTMENTS};
use crate::item::ItemType;

/// Counts written next to the item: `x2`, `2x`, `qty 3`, `10 tabs`, `3 days`.
static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bx\s*(\d+)\b|\b(\d+)\s*x\b|\bqty[:\s]*(\d+)\b|\b(\d+)\s*(?:tabs?|tablets?|caps?|capsules?|vials?|amps?|ampoules?|bags?|units?|pcs|packs?|bottles?|sachets?|days?|sessions?)\b",
    )
    .expect("quantity pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub unit_cost: Decimal,
    pub quantity: u32,
}

/// Extracts an explicit count from `text`, defaulting to 1.
/// Zero and counts too large for `u32` also fall back to 1.
pub fn extract_quantity(text: &str) -> u32 {
    QUANTITY
        .captures(text)
        .and_then(|caps| caps.iter().skip(1).flatten().next().map(|m| m.as_str().to_string()))
        .and_then(|digits| digits.parse::<u32>().ok())
        .filter(|q| *q > 0)
        .unwrap_or(1)
}

/// Returns the product of every adjustment factor whose keywords start a
/// word of `text`. Factors stack multiplicatively.
pub fn adjustment_factor(text: &str) -> Decimal {
    let lowered = text.to_lowercase();
    COST_ADJUSTMENTS
        .iter()
        .filter(|a| catalog::any_keyword(a.keywords, &lowered))
        .fold(Decimal::ONE, |acc, a| acc * a.factor)
}

/// Estimates the unit cost and quantity of an item.
///
/// The base cost comes from the category table, falling back to the generic
/// medical-service cost, and is scaled by the keyword adjustments. The unit
/// cost is rounded to a whole currency unit, half away from zero.
pub fn estimate_cost(item_type: ItemType, item_category: &str, text: &str) -> CostEstimate {
    let base = catalog::base_cost(item_type, item_category);
    let unit_cost = (base * adjustment_factor(text))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    CostEstimate {
        unit_cost,
        quantity: extract_quantity(text),
    }
}
