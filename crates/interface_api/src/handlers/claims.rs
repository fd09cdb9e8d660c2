//! Claim validation handler

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use validator::Validate;

use crate::auth::{self, permissions, Claims};
use crate::dto::claims::{ClaimValidationResponse, ValidateClaimRequest};
use crate::{error::ApiError, AppState};

/// Runs the claim heuristics over a single claim
pub async fn validate_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ValidateClaimRequest>,
) -> Result<Json<ClaimValidationResponse>, ApiError> {
    auth::require_any_role(&claims, permissions::VALIDATE_CLAIMS)?;
    request.validate()?;

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let claim = request.claim.into_claim(state.config.currency)?;
    let report = state.validator.validate_claim(&claim, as_of);

    Ok(Json(ClaimValidationResponse::new(claim, report)))
}
