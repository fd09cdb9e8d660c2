//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! NHIS claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data (claim texts, dates, identifiers)
//! - `builders`: Builder patterns for claims, batches and API payloads
//! - `assertions`: Custom assertion helpers for parsed items and reports
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
