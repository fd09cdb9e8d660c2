//! Parsed claim items

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, Money, MoneyError};

use crate::catalog::has_keyword;

/// Kind of billable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Investigation,
    Procedure,
    Medication,
    OtherService,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Procedure,
        ItemType::Investigation,
        ItemType::Medication,
        ItemType::OtherService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Investigation => "investigation",
            ItemType::Procedure => "procedure",
            ItemType::Medication => "medication",
            ItemType::OtherService => "other_service",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency inferred from keywords, used only to scale estimated cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Routine,
    Urgent,
    Emergency,
}

impl Urgency {
    /// Emergency wins over urgent when both words appear.
    pub fn detect(lowered: &str) -> Self {
        if has_keyword(lowered, "emergency") {
            Urgency::Emergency
        } else if has_keyword(lowered, "urgent") {
            Urgency::Urgent
        } else {
            Urgency::Routine
        }
    }
}

/// One itemized billable component extracted from free text.
///
/// `total_cost` is always `unit_cost * quantity`. The pricing fields are
/// private so the product can only be established by [`ParsedClaimItem::new`]
/// or [`ParsedClaimItem::reprice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClaimItem", into = "RawClaimItem")]
pub struct ParsedClaimItem {
    pub item_type: ItemType,
    pub item_category: String,
    pub item_name: String,
    pub item_description: Option<String>,
    quantity: u32,
    pub unit: String,
    pub dosage: Option<String>,
    pub duration: Option<String>,
    unit_cost: Decimal,
    total_cost: Decimal,
    pub service_date: NaiveDate,
    pub urgency: Urgency,
    pub indication: Option<String>,
}

impl ParsedClaimItem {
    /// Creates an item priced at `unit_cost` for `quantity` units.
    /// A zero quantity is raised to one. Fails if the total does not fit a `Decimal`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        item_type: ItemType,
        item_category: impl Into<String>,
        item_name: impl Into<String>,
        unit: impl Into<String>,
        unit_cost: Decimal,
        quantity: u32,
        service_date: NaiveDate,
        urgency: Urgency,
    ) -> Result<Self, MoneyError> {
        let quantity = quantity.max(1);
        Ok(Self {
            item_type,
            item_category: item_category.into(),
            item_name: item_name.into(),
            item_description: None,
            quantity,
            unit: unit.into(),
            dosage: None,
            duration: None,
            unit_cost,
            total_cost: line_total(unit_cost, quantity)?,
            service_date,
            urgency,
            indication: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.item_description = Some(description.into());
        self
    }

    pub fn with_dosage(mut self, dosage: Option<String>) -> Self {
        self.dosage = dosage;
        self
    }

    pub fn with_duration(mut self, duration: Option<String>) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_indication(mut self, indication: Option<String>) -> Self {
        self.indication = indication;
        self
    }

    /// Changes price and quantity together, recomputing the total
    /// and leaving the item untouched on overflow.
    pub fn reprice(&mut self, unit_cost: Decimal, quantity: u32) -> Result<(), MoneyError> {
        let quantity = quantity.max(1);
        self.total_cost = line_total(unit_cost, quantity)?;
        self.quantity = quantity;
        self.unit_cost = unit_cost;
        Ok(())
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Total as money in the given currency
    pub fn total(&self, currency: Currency) -> Money {
        Money::new(self.total_cost, currency)
    }
}

fn line_total(unit_cost: Decimal, quantity: u32) -> Result<Decimal, MoneyError> {
    unit_cost
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| MoneyError::Overflow(format!("{unit_cost} x {quantity}")))
}

/// Wire shape of an item. Incoming totals are ignored and recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawClaimItem {
    item_type: ItemType,
    item_category: String,
    item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_description: Option<String>,
    quantity: u32,
    unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    unit_cost: Decimal,
    #[serde(default)]
    total_cost: Option<Decimal>,
    service_date: NaiveDate,
    #[serde(default)]
    urgency: Urgency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    indication: Option<String>,
}

impl TryFrom<RawClaimItem> for ParsedClaimItem {
    type Error = String;

    fn try_from(raw: RawClaimItem) -> Result<Self, Self::Error> {
        if raw.unit_cost.is_sign_negative() && !raw.unit_cost.is_zero() {
            return Err(format!("unit_cost must not be negative, got {}", raw.unit_cost));
        }
        let mut item = ParsedClaimItem::new(
            raw.item_type,
            raw.item_category,
            raw.item_name,
            raw.unit,
            raw.unit_cost,
            raw.quantity,
            raw.service_date,
            raw.urgency,
        )
        .map_err(|e| e.to_string())?;
        item.item_description = raw.item_description;
        item.dosage = raw.dosage;
        item.duration = raw.duration;
        item.indication = raw.indication;
        Ok(item)
    }
}

impl From<ParsedClaimItem> for RawClaimItem {
    fn from(item: ParsedClaimItem) -> Self {
        Self {
            item_type: item.item_type,
            item_category: item.item_category,
            item_name: item.item_name,
            item_description: item.item_description,
            quantity: item.quantity,
            unit: item.unit,
            dosage: item.dosage,
            duration: item.duration,
            unit_cost: item.unit_cost,
            total_cost: Some(item.total_cost),
            service_date: item.service_date,
            urgency: item.urgency,
            indication: item.indication,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn test_total_is_unit_cost_times_quantity() {
        let item = ParsedClaimItem::new(
            ItemType::Medication, "Analgesic", "PARACETAMOL", "tablets",
            dec!(1000), 3, date(), Urgency::Routine,
        )
        .unwrap();
        assert_eq!(item.total_cost(), dec!(3000));
    }

    #[test]
    fn test_zero_quantity_becomes_one() {
        let mut item = ParsedClaimItem::new(
            ItemType::Procedure, "Consultation", "REVIEW", "procedures",
            dec!(5000), 0, date(), Urgency::Routine,
        )
        .unwrap();
        assert_eq!(item.quantity(), 1);

        item.reprice(dec!(7000), 0).unwrap();
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.total_cost(), dec!(7000));
    }

    #[test]
    fn test_deserialize_recomputes_total() {
        let json = serde_json::json!({
            "item_type": "investigation",
            "item_category": "Laboratory Test",
            "item_name": "FBC",
            "quantity": 2,
            "unit": "tests",
            "unit_cost": "3000",
            "total_cost": "999999",
            "service_date": "2024-03-14"
        });
        let item: ParsedClaimItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.total_cost(), dec!(6000));
        assert_eq!(item.urgency, Urgency::Routine);
    }

    #[test]
    fn test_deserialize_rejects_negative_cost() {
        let json = serde_json::json!({
            "item_type": "procedure",
            "item_category": "Consultation",
            "item_name": "REVIEW",
            "quantity": 1,
            "unit": "procedures",
            "unit_cost": "-5",
            "service_date": "2024-03-14"
        });
        assert!(serde_json::from_value::<ParsedClaimItem>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_total_beyond_decimal_range() {
        let json = serde_json::json!({
            "item_type": "procedure",
            "item_category": "Surgical Procedure",
            "item_name": "LAPAROTOMY",
            "quantity": 2,
            "unit": "procedures",
            "unit_cost": "79228162514264337593543950335",
            "service_date": "2024-03-14"
        });
        let err = serde_json::from_value::<ParsedClaimItem>(json).unwrap_err();
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn test_reprice_overflow_keeps_previous_price() {
        let mut item = ParsedClaimItem::new(
            ItemType::Medication, "Analgesic", "PARACETAMOL", "tablets",
            dec!(1000), 3, date(), Urgency::Routine,
        )
        .unwrap();

        let result = item.reprice(Decimal::MAX, 2);
        assert!(matches!(result, Err(MoneyError::Overflow(_))));
        assert_eq!(item.unit_cost(), dec!(1000));
        assert_eq!(item.total_cost(), dec!(3000));
    }

    #[test]
    fn test_urgency_detection_prefers_emergency() {
        assert_eq!(Urgency::detect("urgent emergency review"), Urgency::Emergency);
        assert_eq!(Urgency::detect("urgent fbc"), Urgency::Urgent);
        assert_eq!(Urgency::detect("fbc"), Urgency::Routine);
    }
}
