//! Validation and fraud heuristics for claims and batches
//!
//! These rules flag claims for a human reviewer. They never approve or
//! reject anything on their own; a finding is a reason to look closer.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::ClaimId;

use crate::batch::ClaimBatch;
use crate::claim::FacilityClaim;
use crate::item::Urgency;

/// Tunable limits for the heuristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    /// Unit cost above which an item is flagged
    pub high_cost_item: Decimal,
    /// Quantity above which an item is flagged
    pub max_quantity: u32,
    /// Days after service within which a claim should arrive
    pub late_submission_days: i64,
    /// Allowed relative gap between claimed amount and item total
    pub amount_tolerance: Decimal,
    /// Claims per enrollee in one batch before it looks unusual
    pub max_claims_per_enrollee: usize,
    /// Batch total above which the batch needs senior review
    pub batch_cap: Decimal,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            high_cost_item: dec!(500000),
            max_quantity: 60,
            late_submission_days: 90,
            amount_tolerance: dec!(0.01),
            max_claims_per_enrollee: 4,
            batch_cap: dec!(50000000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 3,
            Severity::Critical => 10,
        }
    }
}

/// Which heuristic produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    NoItems,
    FutureServiceDate,
    LateSubmission,
    AmountMismatch,
    AmountOverflow,
    DuplicateItem,
    HighCostItem,
    ExcessiveQuantity,
    MissingDiagnosis,
    UrgencySurcharge,
    DuplicateClaim,
    ForeignFacility,
    CurrencyMismatch,
    EnrolleeFrequency,
    OutsideBatchPeriod,
    BatchCapExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: RuleCode,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<ClaimId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub risk_score: u32,
}

impl ValidationReport {
    fn from_findings(findings: Vec<Finding>) -> Self {
        let risk_score = findings
            .iter()
            .map(|f| f.severity.weight())
            .sum::<u32>()
            .min(100);
        Self { findings, risk_score }
    }

    /// True when nothing above informational was found
    pub fn is_clean(&self) -> bool {
        self.findings.iter().all(|f| f.severity == Severity::Info)
    }

    pub fn has_rule(&self, rule: RuleCode) -> bool {
        self.findings.iter().any(|f| f.rule == rule)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Runs the claim and batch heuristics
#[derive(Debug, Clone, Default)]
pub struct ClaimValidator {
    thresholds: ValidationThresholds,
}

impl ClaimValidator {
    pub fn new(thresholds: ValidationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ValidationThresholds {
        &self.thresholds
    }

    /// Checks one claim as of `as_of` (normally today)
    pub fn validate_claim(&self, claim: &FacilityClaim, as_of: NaiveDate) -> ValidationReport {
        let findings = self.claim_findings(claim, as_of);
        let report = ValidationReport::from_findings(findings);
        debug!(claim = %claim.id, findings = report.findings.len(), risk = report.risk_score, "validated claim");
        report
    }

    /// Checks every claim in the batch plus the batch-level rules
    pub fn validate_batch(&self, batch: &ClaimBatch, as_of: NaiveDate) -> ValidationReport {
        let mut findings: Vec<Finding> = batch
            .claims
            .iter()
            .flat_map(|c| self.claim_findings(c, as_of))
            .collect();

        findings.extend(self.batch_findings(batch));

        let report = ValidationReport::from_findings(findings);
        info!(
            batch = %batch.id,
            claims = batch.claims.len(),
            findings = report.findings.len(),
            risk = report.risk_score,
            "validated batch"
        );
        report
    }

    fn claim_findings(&self, claim: &FacilityClaim, as_of: NaiveDate) -> Vec<Finding> {
        let t = &self.thresholds;
        let mut out = Vec::new();
        let mut push = |rule, severity, message: String| {
            out.push(Finding { rule, severity, message, claim_id: Some(claim.id) });
        };

        if claim.items.is_empty() {
            push(RuleCode::NoItems, Severity::Critical, "claim has no items".to_string());
        }

        if claim.service_date > as_of {
            push(
                RuleCode::FutureServiceDate,
                Severity::Critical,
                format!("service date {} is after {}", claim.service_date, as_of),
            );
        } else {
            let age = (as_of - claim.service_date).num_days();
            if age > t.late_submission_days {
                push(
                    RuleCode::LateSubmission,
                    Severity::Warning,
                    format!("submitted {age} days after service, limit is {}", t.late_submission_days),
                );
            }
        }

        if claim.diagnosis.as_deref().map(str::trim).unwrap_or("").is_empty() {
            push(RuleCode::MissingDiagnosis, Severity::Info, "no diagnosis recorded".to_string());
        }

        match claim.items_total() {
            Ok(items_total) if !items_total.is_zero() => {
                let items_total = items_total.amount();
                let claimed = claim.claimed_amount.amount();
                let beyond_tolerance = claimed
                    .checked_sub(items_total)
                    .and_then(|gap| gap.abs().checked_div(items_total))
                    .map_or(true, |ratio| ratio > t.amount_tolerance);
                if beyond_tolerance {
                    push(
                        RuleCode::AmountMismatch,
                        Severity::Warning,
                        format!("claimed {claimed} but items total {items_total}"),
                    );
                }
            }
            Ok(_) => {}
            Err(err) => push(
                RuleCode::AmountOverflow,
                Severity::Critical,
                format!("item totals cannot be added up: {err}"),
            ),
        }

        let mut seen = HashSet::new();
        for item in &claim.items {
            let key = item.item_name.trim().to_lowercase();
            if !seen.insert(key) {
                push(
                    RuleCode::DuplicateItem,
                    Severity::Warning,
                    format!("item '{}' appears more than once", item.item_name),
                );
            }

            if item.unit_cost() > t.high_cost_item {
                push(
                    RuleCode::HighCostItem,
                    Severity::Warning,
                    format!("'{}' costs {} per unit", item.item_name, item.unit_cost()),
                );
            }

            if item.quantity() > t.max_quantity {
                push(
                    RuleCode::ExcessiveQuantity,
                    Severity::Warning,
                    format!("'{}' billed {} {}", item.item_name, item.quantity(), item.unit),
                );
            }

            if item.urgency != Urgency::Routine {
                push(
                    RuleCode::UrgencySurcharge,
                    Severity::Info,
                    format!("'{}' priced with a {:?} surcharge", item.item_name, item.urgency),
                );
            }
        }

        out
    }

    fn batch_findings(&self, batch: &ClaimBatch) -> Vec<Finding> {
        let t = &self.thresholds;
        let mut out = Vec::new();

        let mut seen_claims: HashSet<(String, NaiveDate, Decimal)> = HashSet::new();
        let mut per_enrollee: HashMap<String, usize> = HashMap::new();

        for claim in &batch.claims {
            let enrollee = normalize_enrollee(&claim.enrollee_number);

            if claim.facility_id != batch.facility_id {
                out.push(Finding {
                    rule: RuleCode::ForeignFacility,
                    severity: Severity::Critical,
                    message: format!("claim {} belongs to facility {}", claim.claim_number, claim.facility_id),
                    claim_id: Some(claim.id),
                });
            }

            if claim.currency != batch.currency {
                out.push(Finding {
                    rule: RuleCode::CurrencyMismatch,
                    severity: Severity::Critical,
                    message: format!("claim in {} inside a {} batch", claim.currency, batch.currency),
                    claim_id: Some(claim.id),
                });
            }

            if !batch.period.contains(claim.service_date) {
                out.push(Finding {
                    rule: RuleCode::OutsideBatchPeriod,
                    severity: Severity::Warning,
                    message: format!("service date {} is outside {}", claim.service_date, batch.period),
                    claim_id: Some(claim.id),
                });
            }

            let key = (enrollee.clone(), claim.service_date, claim.claimed_amount.amount());
            if !seen_claims.insert(key) {
                out.push(Finding {
                    rule: RuleCode::DuplicateClaim,
                    severity: Severity::Critical,
                    message: format!(
                        "enrollee {} already claimed {} on {}",
                        claim.enrollee_number,
                        claim.claimed_amount.amount(),
                        claim.service_date
                    ),
                    claim_id: Some(claim.id),
                });
            }

            *per_enrollee.entry(enrollee).or_insert(0) += 1;
        }

        let mut frequent: Vec<(String, usize)> = per_enrollee
            .into_iter()
            .filter(|(_, n)| *n > t.max_claims_per_enrollee)
            .collect();
        frequent.sort();
        for (enrollee, n) in frequent {
            out.push(Finding {
                rule: RuleCode::EnrolleeFrequency,
                severity: Severity::Warning,
                message: format!("enrollee {enrollee} has {n} claims in this batch"),
                claim_id: None,
            });
        }

        let total = batch
            .claims
            .iter()
            .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(c.claimed_amount.amount()));
        let over_cap = match total {
            Some(total) if total > t.batch_cap => Some(format!("batch total {total} exceeds {}", t.batch_cap)),
            Some(_) => None,
            None => Some(format!("batch total is beyond any amount, cap is {}", t.batch_cap)),
        };
        if let Some(message) = over_cap {
            out.push(Finding {
                rule: RuleCode::BatchCapExceeded,
                severity: Severity::Warning,
                message,
                claim_id: None,
            });
        }

        out
    }
}

fn normalize_enrollee(number: &str) -> String {
    number.trim().to_uppercase()
}
