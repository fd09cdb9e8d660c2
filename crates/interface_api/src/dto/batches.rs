//! Batch DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{BatchId, Currency, FacilityId, Money, TpaId};
use domain_claims::{BatchPeriod, ClaimBatch, ValidationReport};

use crate::dto::claims::ClaimPayload;
use crate::error::ApiError;

/// A month's claims as the facility would batch them.
///
/// Claims are placed in the batch as given, without the checks
/// `ClaimBatch::add_claim` performs, so that the heuristics can report
/// foreign-facility or out-of-period claims instead of refusing the request.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchPayload {
    pub facility_id: FacilityId,
    pub tpa_id: Option<TpaId>,
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    pub currency: Option<Currency>,
    #[validate(length(min = 1, max = 2000), nested)]
    pub claims: Vec<ClaimPayload>,
}

impl BatchPayload {
    pub fn into_batch(self, default_currency: Currency) -> Result<ClaimBatch, ApiError> {
        let currency = self.currency.unwrap_or(default_currency);
        let period = BatchPeriod::new(self.year, self.month)?;

        let mut batch = ClaimBatch::open(self.facility_id, period, currency);
        if let Some(tpa_id) = self.tpa_id {
            batch.assign_tpa(tpa_id);
        }
        batch.claims = self
            .claims
            .into_iter()
            .map(|c| c.into_claim(currency))
            .collect::<Result<_, _>>()?;

        Ok(batch)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateBatchRequest {
    #[validate(nested)]
    pub batch: BatchPayload,
    /// Date the checks are made as of; defaults to today
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchValidationResponse {
    pub batch_id: BatchId,
    pub batch_number: String,
    pub period: BatchPeriod,
    pub claim_count: usize,
    /// Absent when the claims are not all in the batch currency
    pub total_amount: Option<Money>,
    pub report: ValidationReport,
}
