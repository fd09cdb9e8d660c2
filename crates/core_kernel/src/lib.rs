//! Core Kernel - Foundational types shared by the claims workspace
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic, denominated in Naira by default
//! - Strongly-typed identifiers for claims, batches, facilities and TPAs

pub mod money;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{ClaimId, BatchId, FacilityId, TpaId};
pub use error::CoreError;
