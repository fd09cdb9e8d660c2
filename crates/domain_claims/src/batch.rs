//! Monthly claim batches
//!
//! A facility bundles its submitted claims for a month into a batch that is
//! sent to its TPA for vetting.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{BatchId, Currency, FacilityId, Money, TpaId};

use crate::claim::{ClaimStatus, FacilityClaim, UserRole};
use crate::error::ClaimError;

/// Calendar month a batch covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BatchPeriod {
    pub year: i32,
    pub month: u32,
}

impl BatchPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, ClaimError> {
        if !(1..=12).contains(&month) {
            return Err(ClaimError::InvalidPeriod(format!("month {month} is out of range")));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for BatchPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Batch status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Accepting claims
    Open,
    /// Sent to the TPA
    Submitted,
    /// TPA vetting in progress
    UnderReview,
    /// All claims decided
    Closed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A facility's bundle of claims for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimBatch {
    pub id: BatchId,
    pub batch_number: String,
    pub facility_id: FacilityId,
    pub tpa_id: Option<TpaId>,
    pub period: BatchPeriod,
    pub currency: Currency,
    pub claims: Vec<FacilityClaim>,
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimBatch {
    /// Opens an empty batch
    pub fn open(facility_id: FacilityId, period: BatchPeriod, currency: Currency) -> Self {
        let now = Utc::now();
        let id = BatchId::new_v7();

        Self {
            batch_number: format!("BAT-{}-{}", period, &id.as_uuid().simple().to_string()[..8]),
            id,
            facility_id,
            tpa_id: None,
            period,
            currency,
            claims: Vec::new(),
            status: BatchStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assigns the TPA that will vet the batch
    pub fn assign_tpa(&mut self, tpa_id: TpaId) {
        self.tpa_id = Some(tpa_id);
        self.updated_at = Utc::now();
    }

    /// Adds a submitted claim of the same facility; the claim becomes `Batched`
    pub fn add_claim(&mut self, mut claim: FacilityClaim) -> Result<(), ClaimError> {
        if self.status != BatchStatus::Open {
            return Err(ClaimError::BatchNotOpen(self.status.to_string()));
        }
        if claim.facility_id != self.facility_id {
            return Err(ClaimError::FacilityMismatch(claim.id));
        }
        if self.claims.iter().any(|c| c.id == claim.id) {
            return Err(ClaimError::DuplicateClaim(claim.id));
        }
        if claim.status != ClaimStatus::Submitted {
            return Err(ClaimError::NotEligibleForBatch {
                claim_id: claim.id,
                status: claim.status.to_string(),
            });
        }
        if claim.currency != self.currency {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                claim.currency.to_string(),
            )
            .into());
        }

        claim.transition(ClaimStatus::Batched, UserRole::Facility, Some(self.batch_number.clone()))?;
        self.claims.push(claim);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Sends the batch to the TPA
    pub fn submit(&mut self) -> Result<(), ClaimError> {
        if self.status != BatchStatus::Open {
            return Err(ClaimError::BatchNotOpen(self.status.to_string()));
        }
        if self.claims.is_empty() {
            return Err(ClaimError::EmptyBatch);
        }
        self.status = BatchStatus::Submitted;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// TPA picks the batch up for vetting
    pub fn start_review(&mut self, role: UserRole) -> Result<(), ClaimError> {
        self.move_to(BatchStatus::Submitted, BatchStatus::UnderReview, role)
    }

    /// Closes the batch once every claim has a final decision or is approved
    pub fn close(&mut self, role: UserRole) -> Result<(), ClaimError> {
        let undecided = self
            .claims
            .iter()
            .any(|c| matches!(c.status, ClaimStatus::Batched | ClaimStatus::Queried));
        if undecided {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: BatchStatus::Closed.to_string(),
            });
        }
        self.move_to(BatchStatus::UnderReview, BatchStatus::Closed, role)
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Sum of claimed amounts
    pub fn total_amount(&self) -> Result<Money, ClaimError> {
        Ok(Money::sum(self.currency, self.claims.iter().map(|c| &c.claimed_amount))?)
    }

    fn move_to(&mut self, from: BatchStatus, to: BatchStatus, role: UserRole) -> Result<(), ClaimError> {
        if role == UserRole::Facility {
            return Err(ClaimError::RoleNotPermitted {
                role: role.to_string(),
                action: format!("move a batch to {to}"),
            });
        }
        if self.status != from {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}
