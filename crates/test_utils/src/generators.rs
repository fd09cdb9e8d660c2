//! Property-Based Test Generators
//!
//! Proptest strategies producing claim text the way facilities write it:
//! known clinical fragments mixed with noise, dosages, counts and
//! separators.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for fragments the catalog recognises
pub fn known_fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("CAESAREAN SECTION"),
        Just("SVD"),
        Just("CONSULTATION"),
        Just("WOUND DRESSING"),
        Just("FBC"),
        Just("MP TEST"),
        Just("ABDOMINAL ULTRASOUND SCAN"),
        Just("ECG"),
        Just("TAB CEFUROXIME 500MG BD 5/7"),
        Just("INJ ARTESUNATE 120MG STAT"),
        Just("TAB PARACETAMOL 1G TDS"),
        Just("IVF DEXTROSE SALINE"),
        Just("SYR AMOXICILLIN 5ML TDS 5 days"),
        Just("ADMISSION"),
        Just("SPECIALIST REVIEW"),
    ]
    .prop_map(str::to_string)
}

/// Strategy for an optional modifier placed before a fragment
fn modifier_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        4 => Just(""),
        1 => Just("EMERGENCY "),
        1 => Just("URGENT "),
        1 => Just("ICU "),
        1 => Just("CONSULTANT "),
    ]
}

/// Strategy for an optional count placed after a fragment
fn count_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(String::new()),
        1 => (1u32..20).prop_map(|n| format!(" x{n}")),
        1 => (1u32..30).prop_map(|n| format!(" {n} days")),
        1 => (1u32..60).prop_map(|n| format!(" {n} tabs")),
    ]
}

/// Strategy for a single claim line
fn claim_fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (modifier_strategy(), known_fragment_strategy(), count_strategy())
            .prop_map(|(m, f, c)| format!("{m}{f}{c}")),
        1 => "[A-Z][A-Z ]{2,20}",
    ]
}

/// Strategy for a separator between fragments
fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(", "), Just("; "), Just("\n"), Just(",,"), Just(" ; ")]
}

/// Strategy for a whole free-text claim description
pub fn claim_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((claim_fragment_strategy(), separator_strategy()), 0..8).prop_map(
        |parts| {
            parts
                .into_iter()
                .map(|(fragment, sep)| format!("{fragment}{sep}"))
                .collect()
        },
    )
}

/// Strategy for service dates within 2024
pub fn service_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=366).prop_map(|ordinal| {
        NaiveDate::from_yo_opt(2024, ordinal).expect("2024 has 366 days")
    })
}

/// Strategy for whole-Naira amounts
pub fn naira_strategy() -> impl Strategy<Value = Money> {
    (0i64..10_000_000).prop_map(|n| Money::new(Decimal::from(n), Currency::NGN))
}
