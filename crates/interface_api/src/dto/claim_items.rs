//! Claim-item parsing DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Currency;
use domain_claims::{ParseSummary, ParsedClaimItem};

#[derive(Debug, Deserialize, Validate)]
pub struct ParseItemsRequest {
    #[validate(length(min = 1, max = 20000))]
    pub text: String,
    pub service_date: NaiveDate,
    #[validate(length(max = 500))]
    pub diagnosis: Option<String>,
    pub currency: Option<Currency>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseItemsResponse {
    pub items: Vec<ParsedClaimItem>,
    pub summary: ParseSummary,
}
