//! Claim DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::{ClaimId, Currency, FacilityId, Money};
use domain_claims::{FacilityClaim, ParsedClaimItem, ValidationReport};

use crate::error::ApiError;

/// A claim as submitted for checking. Items may be given already itemized,
/// as free text to parse, or both.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClaimPayload {
    pub id: Option<ClaimId>,
    pub facility_id: FacilityId,
    #[validate(length(min = 3, max = 32), custom(function = "validate_enrollee_number"))]
    pub enrollee_number: String,
    pub service_date: NaiveDate,
    #[validate(length(max = 500))]
    pub diagnosis: Option<String>,
    #[validate(length(max = 20000))]
    pub text: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub items: Vec<ParsedClaimItem>,
    pub claimed_amount: Option<Decimal>,
    pub currency: Option<Currency>,
}

impl ClaimPayload {
    /// Builds the draft claim, parsing `text` and appending explicit items
    pub fn into_claim(self, default_currency: Currency) -> Result<FacilityClaim, ApiError> {
        let currency = self.currency.unwrap_or(default_currency);
        let mut claim = FacilityClaim::from_text(
            self.facility_id,
            self.enrollee_number,
            self.service_date,
            self.diagnosis.as_deref(),
            self.text.as_deref().unwrap_or_default(),
            currency,
        )?;

        if let Some(id) = self.id {
            claim.id = id;
        }
        for item in self.items {
            claim.add_item(item)?;
        }
        if let Some(amount) = self.claimed_amount {
            claim.set_claimed_amount(Money::non_negative(amount, currency).map_err(|e| {
                ApiError::Validation(format!("claimed_amount: {e}"))
            })?)?;
        }

        Ok(claim)
    }
}

/// Scheme numbers look like `NHIS/01/778` or `NHIS-01-778`
fn validate_enrollee_number(value: &str) -> Result<(), ValidationError> {
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-'))
        && value.chars().any(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("enrollee_number"))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateClaimRequest {
    #[validate(nested)]
    pub claim: ClaimPayload,
    /// Date the checks are made as of; defaults to today
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimValidationResponse {
    pub claim_id: ClaimId,
    pub claim_number: String,
    pub items: Vec<ParsedClaimItem>,
    /// Absent when the item totals cannot be added up
    pub items_total: Option<Money>,
    pub claimed_amount: Money,
    pub report: ValidationReport,
}

impl ClaimValidationResponse {
    pub fn new(claim: FacilityClaim, report: ValidationReport) -> Self {
        Self {
            claim_id: claim.id,
            items_total: claim.items_total().ok(),
            claim_number: claim.claim_number,
            items: claim.items,
            claimed_amount: claim.claimed_amount,
            report,
        }
    }
}
