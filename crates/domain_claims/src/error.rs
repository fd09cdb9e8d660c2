//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, MoneyError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Role {role} may not {action}")]
    RoleNotPermitted { role: String, action: String },

    #[error("Claim has no items")]
    EmptyClaim,

    #[error("Batch is not open (status {0})")]
    BatchNotOpen(String),

    #[error("Batch has no claims")]
    EmptyBatch,

    #[error("Claim {0} is already in the batch")]
    DuplicateClaim(ClaimId),

    #[error("Claim {0} belongs to a different facility")]
    FacilityMismatch(ClaimId),

    #[error("Claim {claim_id} cannot be batched while {status}")]
    NotEligibleForBatch { claim_id: ClaimId, status: String },

    #[error("Invalid batch period: {0}")]
    InvalidPeriod(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
