// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Contract Tests for the DEVLAB REST API
//!
//! These tests drive the full axum router against an in-memory SQLite
//! store and assert response statuses and JSON shapes.

use assert_json_diff::assert_json_include;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use devlab_api::security::TokenSigner;
use devlab_api::transports::http::server::{create_http_server, ApiState};
use devlab_config::LlmConfig;
use devlab_services::impls::{
    AccountServiceImpl, DatasetServiceImpl, DeviceServiceImpl, ProfileServiceImpl,
    SystemServiceImpl,
};
use devlab_services::{
    AccountService, DatasetService, DeviceService, ProfileService, Store, SystemService,
};

/// Build ApiState over a fresh in-memory store.
/// Each test gets a fresh, isolated database.
fn build_test_state() -> ApiState {
    let store = Arc::new(Store::open_in_memory().expect("in-memory store"));

    let device_service =
        Arc::new(DeviceServiceImpl::new(store.clone())) as Arc<dyn DeviceService + Send + Sync>;
    let dataset_service =
        Arc::new(DatasetServiceImpl::new(store.clone())) as Arc<dyn DatasetService + Send + Sync>;
    let account_service =
        Arc::new(AccountServiceImpl::new(store.clone())) as Arc<dyn AccountService + Send + Sync>;
    let profile_service =
        Arc::new(ProfileServiceImpl::new(store.clone())) as Arc<dyn ProfileService + Send + Sync>;
    let system_service =
        Arc::new(SystemServiceImpl::new(store)) as Arc<dyn SystemService + Send + Sync>;

    ApiState {
        device_service,
        dataset_service,
        account_service,
        profile_service,
        system_service,
        token_signer: Arc::new(TokenSigner::new("contract-test-secret", 60, 24 * 60)),
        llm_defaults: LlmConfig {
            default_api_url: "https://llm.example.com/v1".to_string(),
            default_api_key: "server-default-key".to_string(),
            default_model_name: "default-model".to_string(),
        },
    }
}

/// Helper to create a test server
fn create_test_server() -> axum::Router {
    create_http_server(build_test_state())
}

/// Helper to make a request and get response as JSON
async fn request_json(
    app: axum::Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut request_builder = Request::builder()
        .uri(path)
        .method(method)
        .header("content-type", "application/json");

    if let Some(token) = token {
        request_builder = request_builder.header("authorization", format!("Bearer {}", token));
    }

    let request = if let Some(body_json) = body {
        request_builder
            .body(Body::from(serde_json::to_vec(&body_json).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!(null))
    };

    (status, json)
}

/// Register a user and return an access token
async fn register_and_token(app: &axum::Router, username: &str) -> String {
    let (status, _) = request_json(
        app.clone(),
        "POST",
        "/v1/auth/register",
        Some(json!({"username": username, "password": "hunter2"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request_json(
        app.clone(),
        "POST",
        "/v1/auth/token",
        Some(json!({"username": username, "password": "hunter2"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["access"].as_str().expect("access token").to_string()
}

fn sample_device(number: &str, device_type: &str, experiment_type: &str) -> Value {
    json!({
        "name": format!("device {}", number),
        "device_type": device_type,
        "substrate": "SiC",
        "device_number": number,
        "tech_description": "0.25um GaN HEMT",
        "device_specific_data": [
            {
                "name": "run 1",
                "experiment_type": experiment_type,
                "grid_data": [
                    ["freq_ghz", "p_dbm"],
                    ["2.4", "-35"],
                    ["5.8", "-12"]
                ],
                "csv_files": []
            }
        ]
    })
}

// ============================================================================
// SYSTEM TESTS
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_server();

    let (status, response) =
        request_json(app, "GET", "/v1/system/health_check", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_json_include!(
        actual: response.clone(),
        expected: json!({
            "success": true,
            "data": {
                "status": "healthy",
                "storage_ok": true,
                "device_count": 0,
                "dataset_count": 0,
                "user_count": 0
            }
        })
    );
    assert!(response["timestamp"].is_string());
}

#[tokio::test]
async fn test_version_endpoint() {
    let app = create_test_server();

    let (status, response) = request_json(app, "GET", "/v1/system/version", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response["version"].is_string());
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = create_test_server();

    let (status, _) = request_json(app, "GET", "/v1/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// AUTH TESTS
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let app = create_test_server();

    let (status, body) = request_json(
        app.clone(),
        "POST",
        "/v1/auth/register",
        Some(json!({"username": "alice", "password": "hunter2"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_number());

    let (status, body) = request_json(
        app,
        "POST",
        "/v1/auth/token",
        Some(json!({"username": "alice", "password": "hunter2"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = create_test_server();

    let payload = json!({"username": "alice", "password": "hunter2"});
    let (status, _) =
        request_json(app.clone(), "POST", "/v1/auth/register", Some(payload.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        request_json(app, "POST", "/v1/auth/register", Some(payload), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_register_blank_credentials_rejected() {
    let app = create_test_server();

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/auth/register",
        Some(json!({"username": "  ", "password": ""})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_bad_password_is_401() {
    let app = create_test_server();
    register_and_token(&app, "alice").await;

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/auth/token",
        Some(json!({"username": "alice", "password": "wrong"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user_is_401() {
    let app = create_test_server();

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/auth/token",
        Some(json!({"username": "nobody", "password": "hunter2"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = create_test_server();
    register_and_token(&app, "alice").await;

    let (_, login) = request_json(
        app.clone(),
        "POST",
        "/v1/auth/token",
        Some(json!({"username": "alice", "password": "hunter2"})),
        None,
    )
    .await;
    let refresh = login["refresh"].as_str().unwrap();

    let (status, body) = request_json(
        app.clone(),
        "POST",
        "/v1/auth/token/refresh",
        Some(json!({"refresh": refresh})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());

    // An access token is not accepted by the refresh endpoint
    let access = login["access"].as_str().unwrap();
    let (status, _) = request_json(
        app,
        "POST",
        "/v1/auth/token/refresh",
        Some(json!({"refresh": access})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_bearer_token_rejected() {
    let app = create_test_server();

    let (status, _) = request_json(
        app,
        "GET",
        "/v1/profile",
        None,
        Some("not-a-real-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// DEVICE CATALOG TESTS
// ============================================================================

#[tokio::test]
async fn test_anonymous_cannot_create_device() {
    let app = create_test_server();

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/devices",
        Some(sample_device("D-1", "LNA", "cw")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_device_crud_roundtrip() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    // Create
    let (status, created) = request_json(
        app.clone(),
        "POST",
        "/v1/devices",
        Some(sample_device("D-1", "LNA", "cw")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "response: {}", created);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["device_number"], "D-1");

    // Anonymous read of the full record
    let (status, fetched) = request_json(
        app.clone(),
        "GET",
        &format!("/v1/devices/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["device_specific_data"][0]["experiment_type"], "cw");
    assert_eq!(fetched["device_specific_data"][0]["grid_data"][0][0], "freq_ghz");

    // Patch
    let (status, patched) = request_json(
        app.clone(),
        "PATCH",
        &format!("/v1/devices/{}", id),
        Some(json!({"tech_description": "revised"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["tech_description"], "revised");
    assert_eq!(patched["device_number"], "D-1");

    // Delete
    let (status, _) = request_json(
        app.clone(),
        "DELETE",
        &format!("/v1/devices/{}", id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request_json(
        app,
        "GET",
        &format!("/v1/devices/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_device_number_conflicts() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    let (status, _) = request_json(
        app.clone(),
        "POST",
        "/v1/devices",
        Some(sample_device("D-1", "LNA", "cw")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request_json(
        app,
        "POST",
        "/v1/devices",
        Some(sample_device("D-1", "PA", "pulse")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_device_list_projection_and_filters() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    for (number, device_type, experiment_type) in
        [("D-1", "LNA", "cw"), ("D-2", "PA", "pulse"), ("D-3", "LNA", "pulse")]
    {
        let (status, _) = request_json(
            app.clone(),
            "POST",
            "/v1/devices",
            Some(sample_device(number, device_type, experiment_type)),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Anonymous list, newest first, with the display projection
    let (status, list) = request_json(app.clone(), "GET", "/v1/devices", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["device_number"], "D-3");
    assert_eq!(list[0]["test_types_display"], "pulse");
    // The list projection omits the heavy fields
    assert!(list[0].get("device_specific_data").is_none());
    assert!(list[0].get("photo_data").is_none());

    let (_, filtered) = request_json(
        app.clone(),
        "GET",
        "/v1/devices?device_type=LNA&experiment_type=pulse",
        None,
        None,
    )
    .await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["device_number"], "D-3");

    let (_, searched) =
        request_json(app, "GET", "/v1/devices?search=D-2", None, None).await;
    assert_eq!(searched.as_array().unwrap().len(), 1);
}

// ============================================================================
// PROBABILITY DATASET TESTS
// ============================================================================

#[tokio::test]
async fn test_dataset_crud_roundtrip() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    let curve = json!({"x": [0.0, 1.0], "y": [0.1, 0.9]});
    let (status, created) = request_json(
        app.clone(),
        "POST",
        "/v1/probability_datasets",
        Some(json!({"name": "breakdown", "data": curve})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["data"], curve);

    // Anonymous list is allowed
    let (status, list) =
        request_json(app.clone(), "GET", "/v1/probability_datasets", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Anonymous mutation is not
    let (status, _) = request_json(
        app.clone(),
        "PATCH",
        &format!("/v1/probability_datasets/{}", id),
        Some(json!({"name": "renamed"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, patched) = request_json(
        app.clone(),
        "PATCH",
        &format!("/v1/probability_datasets/{}", id),
        Some(json!({"name": "renamed"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["name"], "renamed");
    assert_eq!(patched["data"], curve);

    let (status, _) = request_json(
        app,
        "DELETE",
        &format!("/v1/probability_datasets/{}", id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_duplicate_dataset_name_conflicts() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    let payload = json!({"name": "breakdown", "data": {}});
    let (status, _) = request_json(
        app.clone(),
        "POST",
        "/v1/probability_datasets",
        Some(payload.clone()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/probability_datasets",
        Some(payload),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ============================================================================
// ASSESSMENT TESTS
// ============================================================================

#[tokio::test]
async fn test_damage_assessment_reference_values() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    let (status, body) = request_json(
        app,
        "POST",
        "/v1/assess/damage",
        Some(json!({
            "pt_gw": 1.0, "gt_db": 0.0, "gr_db": 0.0,
            "f_ghz": 1.0, "d_km": 1.0, "lna_gain_db": 0.0
        })),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "response: {}", body);
    assert_eq!(body["ls_db"], 92.45);
    assert_eq!(body["pr_dbm"], 27.55);
    assert_eq!(body["limiter_loss_db"], 1.5);
    assert_eq!(body["risk_level"], "high");
}

#[tokio::test]
async fn test_damage_assessment_requires_auth() {
    let app = create_test_server();

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/assess/damage",
        Some(json!({"pt_gw": 1.0, "f_ghz": 1.0, "d_km": 1.0})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_damage_assessment_rejects_nonpositive() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    // Missing fields default to zero and fail validation
    let (status, body) = request_json(
        app,
        "POST",
        "/v1/assess/damage",
        Some(json!({"gt_db": 3.0})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_link_assessment_reference_values() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    let (status, body) = request_json(
        app.clone(),
        "POST",
        "/v1/assess/link",
        Some(json!({
            "pt2_kw": 1.0, "gt2_db": 0.0, "gr2_db": 0.0,
            "f2_ghz": 1.0, "d2_km": 1.0, "receiver_sensitivity_dbm": -90.0
        })),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lp_db"], 92.45);
    assert_eq!(body["link_margin_db"], 57.55);
    assert_eq!(body["link_status"], "normal");

    let (_, broken) = request_json(
        app,
        "POST",
        "/v1/assess/link",
        Some(json!({
            "pt2_kw": 1.0, "gt2_db": 0.0, "gr2_db": 0.0,
            "f2_ghz": 1.0, "d2_km": 1.0, "receiver_sensitivity_dbm": 0.0
        })),
        Some(&token),
    )
    .await;
    assert_eq!(broken["link_status"], "broken");
}

#[tokio::test]
async fn test_failure_probability() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    let (status, body) = request_json(
        app.clone(),
        "POST",
        "/v1/probability/calculate",
        Some(json!({"components": [
            {"weight": 1.0, "probability": 0.1},
            {"weight": 3.0, "probability": 0.5}
        ]})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["system_failure_probability"], 0.4);

    // Zero total weight reports zero probability
    let (status, body) = request_json(
        app.clone(),
        "POST",
        "/v1/probability/calculate",
        Some(json!({"components": [{"weight": 0.0, "probability": 0.9}]})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["system_failure_probability"], 0.0);

    // Empty list is a client error
    let (status, _) = request_json(
        app,
        "POST",
        "/v1/probability/calculate",
        Some(json!({"components": []})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// COMPARISON TESTS
// ============================================================================

async fn seed_comparison_devices(app: &axum::Router, token: &str) {
    // D-1 has p_dbm values -35 and -12; D-2 has gain_db only
    let (status, _) = request_json(
        app.clone(),
        "POST",
        "/v1/devices",
        Some(sample_device("D-1", "LNA", "cw")),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut second = sample_device("D-2", "LNA", "cw");
    second["device_specific_data"][0]["grid_data"] = json!([
        ["freq_ghz", "gain_db"],
        ["2.4", "11"]
    ]);
    let (status, _) = request_json(
        app.clone(),
        "POST",
        "/v1/devices",
        Some(second),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_compare_without_filters_returns_all() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;
    seed_comparison_devices(&app, &token).await;

    // Comparison works without a token
    let (status, body) = request_json(
        app,
        "POST",
        "/v1/compare",
        Some(json!({"device_type": "LNA", "experiment_type": "cw"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "response: {}", body);
    assert_eq!(body["filtered_devices"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["available_params"],
        json!(["freq_ghz", "gain_db", "p_dbm"])
    );
}

#[tokio::test]
async fn test_compare_with_range_filter() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;
    seed_comparison_devices(&app, &token).await;

    let (status, body) = request_json(
        app,
        "POST",
        "/v1/compare",
        Some(json!({
            "device_type": "LNA",
            "experiment_type": "cw",
            "fixed_params": [{"name": "p_dbm", "min": "-20", "max": ""}]
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let matches = body["filtered_devices"].as_array().unwrap();
    // Only D-1 has a p_dbm column, and its -12 row is >= -20
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["device_number"], "D-1");
    assert_eq!(matches[0]["device_specific_data"].as_array().unwrap().len(), 1);
    // Headers from the non-matching device still appear
    assert_eq!(
        body["available_params"],
        json!(["freq_ghz", "gain_db", "p_dbm"])
    );
}

#[tokio::test]
async fn test_compare_requires_both_type_fields() {
    let app = create_test_server();

    let (status, _) = request_json(
        app.clone(),
        "POST",
        "/v1/compare",
        Some(json!({"device_type": "LNA"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/compare",
        Some(json!({"experiment_type": "cw"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compare_bad_bound_is_400() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;
    seed_comparison_devices(&app, &token).await;

    let (status, _) = request_json(
        app,
        "POST",
        "/v1/compare",
        Some(json!({
            "device_type": "LNA",
            "experiment_type": "cw",
            "fixed_params": [{"name": "p_dbm", "min": "abc"}]
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// PROFILE TESTS
// ============================================================================

#[tokio::test]
async fn test_profile_requires_auth() {
    let app = create_test_server();

    let (status, _) = request_json(app, "GET", "/v1/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_defaults_and_update() {
    let app = create_test_server();
    let token = register_and_token(&app, "alice").await;

    let (status, body) =
        request_json(app.clone(), "GET", "/v1/profile", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_configs"], json!([]));
    assert_eq!(body["active_config_id"], "default");
    assert_eq!(
        body["default_config"]["llm_api_url"],
        "https://llm.example.com/v1"
    );
    assert_eq!(body["default_config"]["llm_model_name"], "default-model");

    let configs = json!([{
        "id": 1678886400000i64,
        "name": "my model",
        "llm_api_url": "https://api.example.com",
        "llm_api_key": "sk-user",
        "llm_model_name": "user-model"
    }]);

    let (status, updated) = request_json(
        app.clone(),
        "PATCH",
        "/v1/profile",
        Some(json!({"user_configs": configs, "active_config_id": "1678886400000"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["user_configs"], configs);
    assert_eq!(updated["active_config_id"], "1678886400000");
    assert!(updated["default_config"]["llm_api_key"].is_string());

    // Re-read survives
    let (_, reread) = request_json(app, "GET", "/v1/profile", None, Some(&token)).await;
    assert_eq!(reread["user_configs"], configs);
}

#[tokio::test]
async fn test_profiles_are_per_user() {
    let app = create_test_server();
    let alice = register_and_token(&app, "alice").await;
    let bob = register_and_token(&app, "bob").await;

    let (_, _) = request_json(
        app.clone(),
        "PATCH",
        "/v1/profile",
        Some(json!({"active_config_id": "42"})),
        Some(&alice),
    )
    .await;

    let (_, bobs) = request_json(app, "GET", "/v1/profile", None, Some(&bob)).await;
    assert_eq!(bobs["active_config_id"], "default");
}
