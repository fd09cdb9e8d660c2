//! HTTP API Layer
//!
//! This crate exposes the claim-item parser and the claim/batch validators
//! over HTTP using Axum. It is stateless: every request carries the claim
//! data it wants checked.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for parsing and validation
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{middleware as axum_middleware, routing::{get, post}, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimValidator;

use crate::config::ApiConfig;
use crate::handlers::{batches, claim_items, claims, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub validator: ClaimValidator,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        let validator = ClaimValidator::new(config.thresholds.clone());
        Self { config, validator }
    }
}

/// Creates the main API router
pub fn create_router(config: ApiConfig) -> Router {
    let state = AppState::new(config);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Protected API routes
    let api_routes = Router::new()
        .route("/claim-items/parse", post(claim_items::parse_claim_items))
        .route("/claims/validate", post(claims::validate_claim))
        .route("/batches/validate", post(batches::validate_batch))
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
