//! Batch validation handler

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use validator::Validate;

use crate::auth::{self, permissions, Claims};
use crate::dto::batches::{BatchValidationResponse, ValidateBatchRequest};
use crate::{error::ApiError, AppState};

/// Runs the claim and batch heuristics over a month's claims
pub async fn validate_batch(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ValidateBatchRequest>,
) -> Result<Json<BatchValidationResponse>, ApiError> {
    auth::require_any_role(&claims, permissions::VALIDATE_BATCHES)?;
    request.validate()?;

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let batch = request.batch.into_batch(state.config.currency)?;
    let report = state.validator.validate_batch(&batch, as_of);

    Ok(Json(BatchValidationResponse {
        batch_id: batch.id,
        total_amount: batch.total_amount().ok(),
        claim_count: batch.claim_count(),
        period: batch.period,
        batch_number: batch.batch_number,
        report,
    }))
}
