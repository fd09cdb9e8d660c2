//! Request and response bodies

pub mod batches;
pub mod claim_items;
pub mod claims;
