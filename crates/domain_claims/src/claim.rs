//! Facility claim aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, Currency, FacilityId, Money};

use crate::error::ClaimError;
use crate::item::ParsedClaimItem;
use crate::parser::parse_claim_text;

/// The three kinds of user acting on claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Hospital or clinic submitting claims
    Facility,
    /// Third-party administrator vetting claims
    Tpa,
    /// Scheme administrator approving and paying
    NhisAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Facility => "facility",
            UserRole::Tpa => "tpa",
            UserRole::NhisAdmin => "nhis_admin",
        }
    }

    /// Parses the role names carried in tokens
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "facility" => Some(UserRole::Facility),
            "tpa" => Some(UserRole::Tpa),
            "nhis_admin" => Some(UserRole::NhisAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Being prepared by the facility
    Draft,
    /// Submitted, waiting to be batched
    Submitted,
    /// Included in a batch sent to the TPA
    Batched,
    /// Vetted by the TPA
    Verified,
    /// Returned to the facility with questions
    Queried,
    /// Rejected by the TPA
    Rejected,
    /// Approved for payment
    Approved,
    /// Paid
    Paid,
}

impl ClaimStatus {
    /// Roles allowed to move a claim from `self` to `target`, or `None` when
    /// the transition does not exist. NHIS admins may act wherever a TPA may.
    fn permitted_roles(self, target: ClaimStatus) -> Option<&'static [UserRole]> {
        const FACILITY: &[UserRole] = &[UserRole::Facility];
        const REVIEWERS: &[UserRole] = &[UserRole::Tpa, UserRole::NhisAdmin];
        const ADMIN: &[UserRole] = &[UserRole::NhisAdmin];

        use ClaimStatus::*;
        match (self, target) {
            (Draft, Submitted) | (Queried, Submitted) | (Submitted, Batched) => Some(FACILITY),
            (Batched, Verified) | (Batched, Queried) | (Batched, Rejected) => Some(REVIEWERS),
            (Verified, Approved) | (Approved, Paid) => Some(ADMIN),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Paid)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// An entry in a claim's status history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: ClaimStatus,
    pub to: ClaimStatus,
    pub role: UserRole,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// A claim raised by a facility for one enrollee encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityClaim {
    pub id: ClaimId,
    pub claim_number: String,
    pub facility_id: FacilityId,
    /// Scheme membership number of the patient
    pub enrollee_number: String,
    pub service_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub items: Vec<ParsedClaimItem>,
    /// Amount the facility is asking for
    pub claimed_amount: Money,
    pub currency: Currency,
    pub status: ClaimStatus,
    pub history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FacilityClaim {
    /// Creates an empty draft claim
    pub fn draft(
        facility_id: FacilityId,
        enrollee_number: impl Into<String>,
        service_date: NaiveDate,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: ClaimId::new_v7(),
            claim_number: generate_claim_number(),
            facility_id,
            enrollee_number: enrollee_number.into(),
            service_date,
            diagnosis: None,
            items: Vec::new(),
            claimed_amount: Money::zero(currency),
            currency,
            status: ClaimStatus::Draft,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a draft whose items are parsed from a free-text description.
    /// The claimed amount starts as the estimated item total.
    pub fn from_text(
        facility_id: FacilityId,
        enrollee_number: impl Into<String>,
        service_date: NaiveDate,
        diagnosis: Option<&str>,
        text: &str,
        currency: Currency,
    ) -> Result<Self, ClaimError> {
        let mut claim = Self::draft(facility_id, enrollee_number, service_date, currency);
        claim.diagnosis = diagnosis.map(str::trim).filter(|d| !d.is_empty()).map(str::to_string);
        claim.items = parse_claim_text(text, service_date, claim.diagnosis.as_deref());
        claim.claimed_amount = claim.items_total()?;
        Ok(claim)
    }

    /// Adds an item and keeps the claimed amount in step with the items
    /// when it had been tracking them. An item that would overflow the
    /// claim total is refused.
    pub fn add_item(&mut self, item: ParsedClaimItem) -> Result<(), ClaimError> {
        let before = self.items_total()?;
        let after = before.checked_add(&item.total(self.currency))?;
        if self.claimed_amount == before {
            self.claimed_amount = after;
        }
        self.items.push(item);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Overrides the claimed amount
    pub fn set_claimed_amount(&mut self, amount: Money) -> Result<(), ClaimError> {
        if amount.currency() != self.currency {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                amount.currency().to_string(),
            )
            .into());
        }
        self.claimed_amount = amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Sum of all item totals
    pub fn items_total(&self) -> Result<Money, ClaimError> {
        let mut total = Money::zero(self.currency);
        for item in &self.items {
            total = total.checked_add(&item.total(self.currency))?;
        }
        Ok(total)
    }

    /// Moves the claim to `target` on behalf of `role`
    pub fn transition(
        &mut self,
        target: ClaimStatus,
        role: UserRole,
        note: Option<String>,
    ) -> Result<(), ClaimError> {
        let permitted = self.status.permitted_roles(target).ok_or_else(|| {
            ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            }
        })?;

        if !permitted.contains(&role) {
            return Err(ClaimError::RoleNotPermitted {
                role: role.to_string(),
                action: format!("move a claim from {} to {}", self.status, target),
            });
        }

        if target == ClaimStatus::Submitted && self.items.is_empty() {
            return Err(ClaimError::EmptyClaim);
        }

        let now = Utc::now();
        self.history.push(StatusChange {
            from: self.status,
            to: target,
            role,
            note,
            at: now,
        });
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    /// Facility submission
    pub fn submit(&mut self) -> Result<(), ClaimError> {
        self.transition(ClaimStatus::Submitted, UserRole::Facility, None)
    }
}

fn generate_claim_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("CLM-{}", duration.as_millis() % 10_000_000_000)
}
