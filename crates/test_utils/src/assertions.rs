//! Custom Test Assertions
//!
//! Assertion helpers for parsed items and validation reports that print the
//! offending values on failure.

use core_kernel::Money;
use domain_claims::{ParsedClaimItem, RuleCode, ValidationReport};
use rust_decimal::Decimal;

/// Asserts that two Money values are equal in currency and amount
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amount mismatch: actual={}, expected={}",
        actual.amount(),
        expected.amount()
    );
}

/// Asserts the pricing invariants every parsed item must hold
pub fn assert_item_consistent(item: &ParsedClaimItem) {
    assert!(item.quantity() >= 1, "'{}' has quantity 0", item.item_name);
    assert_eq!(
        item.total_cost(),
        item.unit_cost() * Decimal::from(item.quantity()),
        "'{}' total {} is not {} x {}",
        item.item_name,
        item.total_cost(),
        item.unit_cost(),
        item.quantity()
    );
    assert!(
        item.unit_cost().fract().is_zero(),
        "'{}' unit cost {} is not whole",
        item.item_name,
        item.unit_cost()
    );
}

/// Asserts [`assert_item_consistent`] for every item
pub fn assert_items_consistent(items: &[ParsedClaimItem]) {
    items.iter().for_each(assert_item_consistent);
}

/// Asserts that a report contains a finding from `rule`
pub fn assert_has_rule(report: &ValidationReport, rule: RuleCode) {
    assert!(
        report.has_rule(rule),
        "Expected a {:?} finding, got {:?}",
        rule,
        report.findings.iter().map(|f| f.rule).collect::<Vec<_>>()
    );
}

/// Asserts that a report has no finding from `rule`
pub fn assert_lacks_rule(report: &ValidationReport, rule: RuleCode) {
    assert!(
        !report.has_rule(rule),
        "Unexpected {:?} finding: {:?}",
        rule,
        report.findings.iter().filter(|f| f.rule == rule).collect::<Vec<_>>()
    );
}
