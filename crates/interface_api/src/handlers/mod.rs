//! Request handlers

pub mod batches;
pub mod claim_items;
pub mod claims;
pub mod health;
