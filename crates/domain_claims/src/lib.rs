//! Claims Domain
//!
//! This crate implements the claim side of a national health-insurance
//! scheme: turning a facility's free-text treatment description into priced
//! claim items, carrying claims through TPA vetting and payment, bundling
//! them into monthly batches, and flagging suspicious claims.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Draft -> Submitted -> Batched -> Verified -> Approved -> Paid
//!                 ^          |
//!                 +- Queried-+-> Rejected
//! ```

pub mod catalog;
pub mod item;
pub mod categorize;
pub mod extract;
pub mod estimate;
pub mod parser;
pub mod claim;
pub mod batch;
pub mod validation;
pub mod error;

pub use item::{ItemType, ParsedClaimItem, Urgency};
pub use categorize::{categorize_item, Categorization};
pub use extract::{extract_dosage, extract_frequency, DosageExtraction, FrequencyExtraction};
pub use estimate::{estimate_cost, CostEstimate};
pub use parser::{parse_claim_text, ParseSummary};
pub use claim::{ClaimStatus, FacilityClaim, StatusChange, UserRole};
pub use batch::{BatchPeriod, BatchStatus, ClaimBatch};
pub use validation::{ClaimValidator, Finding, RuleCode, Severity, ValidationReport, ValidationThresholds};
pub use error::ClaimError;
