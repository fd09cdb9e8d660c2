//! HTTP tests for the claims API

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_claims::UserRole;
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::{
    claim_payload_json, parse_request_json, ClaimTextFixtures, DateFixtures, IdFixtures,
};

fn server() -> TestServer {
    TestServer::new(create_router(ApiConfig::default())).unwrap()
}

fn bearer(role: UserRole) -> HeaderValue {
    let config = ApiConfig::default();
    let token = create_token(
        "user-1",
        &[role],
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )
    .unwrap();
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let server = server();

    server.get("/health").await.assert_status_ok();

    let ready: Value = server.get("/health/ready").await.json();
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["currency"], "NGN");
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let response = server()
        .post("/api/v1/claim-items/parse")
        .json(&parse_request_json(ClaimTextFixtures::caesarean(), DateFixtures::service_date()))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let token = create_token("user-1", &[UserRole::Tpa], "not-the-secret", 600).unwrap();

    server()
        .post("/api/v1/claim-items/parse")
        .add_header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap())
        .json(&parse_request_json(ClaimTextFixtures::caesarean(), DateFixtures::service_date()))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Claim-item parsing
// ============================================================================

#[tokio::test]
async fn test_parse_returns_items_and_summary() {
    let response = server()
        .post("/api/v1/claim-items/parse")
        .add_header(AUTHORIZATION, bearer(UserRole::Facility))
        .json(&parse_request_json(
            ClaimTextFixtures::surgical_admission(),
            DateFixtures::service_date(),
        ))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["item_type"], "procedure");
    assert_eq!(items[0]["item_category"], "Surgical Procedure");
    assert_eq!(items[0]["indication"], "Malaria");
    assert_eq!(items[3]["unit"], "days");

    assert_eq!(body["summary"]["item_count"], 4);
    let total: rust_decimal::Decimal =
        serde_json::from_value(body["summary"]["total"]["amount"].clone()).unwrap();
    assert_eq!(total, dec!(190500));
}

#[tokio::test]
async fn test_parse_rejects_empty_text() {
    let response = server()
        .post("/api/v1/claim-items/parse")
        .add_header(AUTHORIZATION, bearer(UserRole::Facility))
        .json(&json!({ "text": "", "service_date": "2024-03-14" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["details"][0], "text is invalid");
}

#[tokio::test]
async fn test_parse_of_separators_only_is_empty() {
    let body: Value = server()
        .post("/api/v1/claim-items/parse")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&parse_request_json(ClaimTextFixtures::blank(), DateFixtures::service_date()))
        .await
        .json();

    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"]["item_count"], 0);
}

// ============================================================================
// Claim validation
// ============================================================================

#[tokio::test]
async fn test_facility_cannot_validate_claims() {
    let claim = claim_payload_json(
        IdFixtures::facility_id(),
        &IdFixtures::enrollee_number(1),
        ClaimTextFixtures::malaria(),
    );

    server()
        .post("/api/v1/claims/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Facility))
        .json(&json!({ "claim": claim, "as_of": "2024-03-21" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_clean_claim_validates() {
    let claim = claim_payload_json(
        IdFixtures::facility_id(),
        &IdFixtures::enrollee_number(1),
        ClaimTextFixtures::malaria(),
    );

    let response = server()
        .post("/api/v1/claims/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&json!({ "claim": claim, "as_of": "2024-03-21" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert_eq!(body["report"]["risk_score"], 0);
    assert!(body["report"]["findings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_inflated_late_claim_is_flagged() {
    let mut claim = claim_payload_json(
        IdFixtures::facility_id(),
        &IdFixtures::enrollee_number(2),
        ClaimTextFixtures::malaria(),
    );
    claim["claimed_amount"] = json!("20000");

    let body: Value = server()
        .post("/api/v1/claims/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::NhisAdmin))
        .json(&json!({ "claim": claim, "as_of": DateFixtures::late_review_date() }))
        .await
        .json();

    let rules: Vec<&str> = body["report"]["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["rule"].as_str().unwrap())
        .collect();
    assert!(rules.contains(&"amount_mismatch"));
    assert!(rules.contains(&"late_submission"));
    assert_eq!(body["report"]["risk_score"], 6);
}

#[tokio::test]
async fn test_bad_enrollee_number_is_rejected() {
    let claim = claim_payload_json(IdFixtures::facility_id(), "N 1", ClaimTextFixtures::malaria());

    let response = server()
        .post("/api/v1/claims/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&json!({ "claim": claim }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Batch validation
// ============================================================================

#[tokio::test]
async fn test_batch_heuristics() {
    let facility = IdFixtures::facility_id();
    let enrollee = IdFixtures::enrollee_number(7);
    let claims = vec![
        claim_payload_json(facility, &enrollee, ClaimTextFixtures::malaria()),
        claim_payload_json(facility, &enrollee, ClaimTextFixtures::malaria()),
        claim_payload_json(
            IdFixtures::facility_id(),
            &IdFixtures::enrollee_number(8),
            ClaimTextFixtures::caesarean(),
        ),
    ];

    let response = server()
        .post("/api/v1/batches/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&json!({
            "batch": {
                "facility_id": facility,
                "year": 2024,
                "month": 3,
                "claims": claims,
            },
            "as_of": DateFixtures::review_date(),
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["claim_count"], 3);
    assert_eq!(body["period"]["month"], 3);
    let rules: Vec<&str> = body["report"]["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["rule"].as_str().unwrap())
        .collect();
    assert_eq!(rules, vec!["duplicate_claim", "foreign_facility"]);
    assert_eq!(body["report"]["risk_score"], 20);
}

#[tokio::test]
async fn test_batch_with_bad_month_is_rejected() {
    let facility = IdFixtures::facility_id();

    server()
        .post("/api/v1/batches/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&json!({
            "batch": {
                "facility_id": facility,
                "year": 2024,
                "month": 13,
                "claims": [claim_payload_json(facility, "NHIS/01/0001", ClaimTextFixtures::malaria())],
            },
        }))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_batch_without_claims_is_rejected() {
    let response = server()
        .post("/api/v1/batches/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&json!({
            "batch": {
                "facility_id": IdFixtures::facility_id(),
                "year": 2024,
                "month": 3,
                "claims": [],
            },
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["details"][0], "batch is invalid");
}

// ============================================================================
// Amounts beyond the decimal range
// ============================================================================

fn imaging_item(unit_cost: &str, quantity: u32) -> Value {
    json!({
        "item_type": "investigation",
        "item_category": "Imaging",
        "item_name": "MRI BRAIN",
        "quantity": quantity,
        "unit": "tests",
        "unit_cost": unit_cost,
        "service_date": DateFixtures::service_date(),
    })
}

#[tokio::test]
async fn test_item_total_beyond_decimal_range_is_rejected() {
    let mut claim = claim_payload_json(
        IdFixtures::facility_id(),
        &IdFixtures::enrollee_number(3),
        ClaimTextFixtures::malaria(),
    );
    claim["items"] = json!([imaging_item("79228162514264337593543950335", 2)]);

    server()
        .post("/api/v1/claims/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&json!({ "claim": claim }))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_items_summing_beyond_decimal_range_are_rejected() {
    let facility = IdFixtures::facility_id();
    let mut claim = claim_payload_json(facility, &IdFixtures::enrollee_number(4), ClaimTextFixtures::malaria());
    claim["items"] = json!([
        imaging_item("50000000000000000000000000000", 1),
        imaging_item("50000000000000000000000000000", 1),
    ]);

    let response = server()
        .post("/api/v1/batches/validate")
        .add_header(AUTHORIZATION, bearer(UserRole::Tpa))
        .json(&json!({
            "batch": { "facility_id": facility, "year": 2024, "month": 3, "claims": [claim] },
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "validation_error");
}
