//! Free-text claim parsing
//!
//! Splits a treatment description such as
//! `"CAESAREAN SECTION, TAB CEFUROXIME 500MG BD 5/7; FBC x2"` into
//! [`ParsedClaimItem`]s with an estimated cost each. The pipeline is
//! linear and stateless:
//!
//! ```text
//! split -> categorize -> extract dosage -> extract frequency -> estimate cost -> assemble
//! ```
//!
//! The output is a best-effort guess for a reviewer to correct, never a
//! verified statement of clinical or financial fact. A fragment the tables
//! do not recognise still yields an item, priced as a generic medical service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::{Currency, Money, MoneyError};

use crate::catalog::{self, DEFAULT_MEDICATION_UNIT, DEFAULT_OTHER_SERVICE_UNIT};
use crate::categorize::categorize_item;
use crate::estimate::estimate_cost;
use crate::extract::{extract_dosage, extract_frequency};
use crate::item::{ItemType, ParsedClaimItem, Urgency};

/// Fragments shorter than this are noise (stray initials, unit fragments).
pub const MIN_TOKEN_CHARS: usize = 3;

static TOKEN_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\r\n]+").expect("separator pattern is valid"));

/// Summary lines carrying a figure and bare amounts: "Total 45,000",
/// "Amount due: N5000", "N5000", "000". "Total abdominal hysterectomy" is an item.
static SUMMARY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:(?:grand|sub)\s*-?\s*total|total|amount|sum)(?:\s+(?:due|payable|billed|claimed))?\s*[:=-]?\s*)?(?:₦|ngn|n)?\s*\d[\d.\s]*$",
    )
    .expect("summary pattern is valid")
});

/// Splits `text` into candidate item fragments, trimmed, with empty,
/// summary/amount and too-short fragments removed.
pub fn split_tokens(text: &str) -> Vec<&str> {
    TOKEN_SEPARATORS
        .split(text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| !SUMMARY_TOKEN.is_match(t))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}

/// Parses a free-text treatment description into claim items.
///
/// `diagnosis` becomes every item's indication. Identical inputs always
/// produce identical output.
pub fn parse_claim_text(
    text: &str,
    service_date: NaiveDate,
    diagnosis: Option<&str>,
) -> Vec<ParsedClaimItem> {
    let indication = diagnosis
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let items: Vec<ParsedClaimItem> = split_tokens(text)
        .into_iter()
        .filter_map(|token| match parse_token(token, service_date, indication.clone()) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(token, %error, "dropping claim fragment that cannot be priced");
                None
            }
        })
        .collect();

    debug!(items = items.len(), %service_date, "parsed claim text");
    items
}

fn parse_token(
    token: &str,
    service_date: NaiveDate,
    indication: Option<String>,
) -> Result<ParsedClaimItem, MoneyError> {
    let lowered = token.to_lowercase();
    let categorization = categorize_item(token);
    let dosage = extract_dosage(token);
    let frequency = extract_frequency(&dosage.clean_name);
    let estimate = estimate_cost(categorization.item_type, &categorization.item_category, token);

    let item_name = if frequency.clean_name.trim().is_empty() {
        token.to_string()
    } else {
        frequency.clean_name.trim().to_string()
    };

    debug!(
        token,
        item_type = %categorization.item_type,
        category = %categorization.item_category,
        unit_cost = %estimate.unit_cost,
        quantity = estimate.quantity,
        "categorized claim fragment"
    );

    let item = ParsedClaimItem::new(
        categorization.item_type,
        categorization.item_category,
        item_name,
        unit_for(categorization.item_type, &lowered),
        estimate.unit_cost,
        estimate.quantity,
        service_date,
        Urgency::detect(&lowered),
    )?;

    Ok(item
        .with_description(token)
        .with_dosage(dosage.dosage)
        .with_duration(frequency.duration)
        .with_indication(indication))
}

/// Picks the unit label for an item from its type and wording.
pub fn unit_for(item_type: ItemType, lowered: &str) -> &'static str {
    match item_type {
        ItemType::Medication => {
            catalog::first_unit(catalog::MEDICATION_UNITS, lowered).unwrap_or(DEFAULT_MEDICATION_UNIT)
        }
        ItemType::Investigation => "tests",
        ItemType::Procedure => "procedures",
        ItemType::OtherService => catalog::first_unit(catalog::OTHER_SERVICE_UNITS, lowered)
            .unwrap_or(DEFAULT_OTHER_SERVICE_UNIT),
    }
}

/// Roll-up of a parsed item list for display next to the items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub item_count: usize,
    pub by_type: BTreeMap<ItemType, usize>,
    pub total: Money,
}

impl ParseSummary {
    pub fn from_items(items: &[ParsedClaimItem], currency: Currency) -> Result<Self, MoneyError> {
        let mut by_type = BTreeMap::new();
        let mut total = Money::zero(currency);
        for item in items {
            *by_type.entry(item.item_type).or_insert(0) += 1;
            total = total.checked_add(&item.total(currency))?;
        }

        Ok(Self {
            item_count: items.len(),
            by_type,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[test]
    fn test_split_drops_empty_short_and_summary_tokens() {
        let tokens = split_tokens("FBC, ;  ab ; Total 45,000 ; N5000; Amount due: 5000; PCV\nHBsAg");
        assert_eq!(tokens, vec!["FBC", "PCV", "HBsAg"]);
    }

    #[test]
    fn test_total_procedure_is_not_a_summary_line() {
        assert_eq!(split_tokens("Total abdominal hysterectomy"), vec!["Total abdominal hysterectomy"]);
        assert_eq!(split_tokens("Amount payable"), vec!["Amount payable"]);

        let items = parse_claim_text("Total abdominal hysterectomy", date(), None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_category, "Surgical Procedure");
        assert_eq!(items[0].unit_cost(), dec!(150000));
    }

    #[test]
    fn test_split_drops_number_fragments_from_thousands_separators() {
        let tokens = split_tokens("CAESAREAN SECTION 150,000");
        assert_eq!(tokens, vec!["CAESAREAN SECTION 150"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_claim_text("", date(), None).is_empty());
        assert!(parse_claim_text("  , ; ", date(), None).is_empty());
    }

    #[test]
    fn test_item_assembly() {
        let items = parse_claim_text("TAB CEFUROXIME 500MG BD 5/7", date(), Some(" Typhoid "));
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.item_type, ItemType::Medication);
        assert_eq!(item.item_name, "TAB CEFUROXIME");
        assert_eq!(item.item_description.as_deref(), Some("TAB CEFUROXIME 500MG BD 5/7"));
        assert_eq!(item.indication.as_deref(), Some("Typhoid"));
        assert_eq!(item.service_date, date());
    }

    #[test]
    fn test_blank_diagnosis_is_dropped() {
        let items = parse_claim_text("FBC", date(), Some("   "));
        assert_eq!(items[0].indication, None);
    }

    #[test]
    fn test_units() {
        assert_eq!(unit_for(ItemType::Medication, "inj ceftriaxone"), "vials");
        assert_eq!(unit_for(ItemType::Medication, "dextrose saline"), "bags");
        assert_eq!(unit_for(ItemType::Medication, "paracetamol syrup"), "ml");
        assert_eq!(unit_for(ItemType::Medication, "coartem"), "tablets");
        assert_eq!(unit_for(ItemType::Investigation, "fbc"), "tests");
        assert_eq!(unit_for(ItemType::OtherService, "admission"), "days");
        assert_eq!(unit_for(ItemType::OtherService, "oxygen 6 hrs"), "hours");
        assert_eq!(unit_for(ItemType::OtherService, "ambulance"), "services");
    }

    #[test]
    fn test_summary_counts_and_total() {
        let items = parse_claim_text("CAESAREAN SECTION, FBC x2, PCV", date(), None);
        let summary = ParseSummary::from_items(&items, Currency::NGN).unwrap();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.by_type.get(&ItemType::Investigation), Some(&2));
        assert_eq!(summary.by_type.get(&ItemType::Procedure), Some(&1));
        assert_eq!(summary.total.amount(), dec!(159000));
    }
}
