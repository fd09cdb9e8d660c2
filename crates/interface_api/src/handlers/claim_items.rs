//! Claim-item parsing handler

use axum::{extract::State, Extension, Json};
use tracing::info;
use validator::Validate;

use domain_claims::{parse_claim_text, ClaimError, ParseSummary};

use crate::auth::{self, permissions, Claims};
use crate::dto::claim_items::{ParseItemsRequest, ParseItemsResponse};
use crate::{error::ApiError, AppState};

/// Parses a free-text treatment description into priced claim items
pub async fn parse_claim_items(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ParseItemsRequest>,
) -> Result<Json<ParseItemsResponse>, ApiError> {
    auth::require_any_role(&claims, permissions::PARSE_ITEMS)?;
    request.validate()?;

    let currency = request.currency.unwrap_or(state.config.currency);
    let items = parse_claim_text(
        &request.text,
        request.service_date,
        request.diagnosis.as_deref(),
    );
    let summary = ParseSummary::from_items(&items, currency).map_err(ClaimError::from)?;

    info!(
        user = %claims.sub,
        items = summary.item_count,
        total = %summary.total,
        "parsed claim text"
    );

    Ok(Json(ParseItemsResponse { items, summary }))
}
