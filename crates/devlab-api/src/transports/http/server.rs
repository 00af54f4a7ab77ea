// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// HTTP server implementation (Axum)
//
// This module sets up the HTTP API server with Axum, including routing,
// middleware, and state management.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{Json, Redirect, Response},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use devlab_config::LlmConfig;
use devlab_services::{
    AccountService, DatasetService, DeviceService, ProfileService, SystemService,
};

use crate::middleware::create_cors_layer;
use crate::openapi::ApiDoc;
use crate::security::TokenSigner;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub device_service: Arc<dyn DeviceService + Send + Sync>,
    pub dataset_service: Arc<dyn DatasetService + Send + Sync>,
    pub account_service: Arc<dyn AccountService + Send + Sync>,
    pub profile_service: Arc<dyn ProfileService + Send + Sync>,
    pub system_service: Arc<dyn SystemService + Send + Sync>,
    pub token_signer: Arc<TokenSigner>,
    /// Server-wide LLM defaults surfaced by the profile endpoint
    pub llm_defaults: LlmConfig,
}

/// Create the main HTTP server application
pub fn create_http_server(state: ApiState) -> Router {
    Router::new()
        // Root redirect to the OpenAPI document
        .route("/", get(root_redirect))

        // OpenAPI spec endpoint
        .route("/api-docs/openapi.json", get(|| async {
            Json(ApiDoc::openapi())
        }))

        .nest("/v1", create_v1_router())

        // Catch-all route for debugging unmatched requests
        .fallback(|| async {
            tracing::warn!(target: "devlab-api", "Unmatched request - 404 Not Found");
            (StatusCode::NOT_FOUND, "404 Not Found")
        })

        // Add state
        .with_state(state)

        // Add middleware
        .layer(middleware::from_fn(log_request_response_bodies))
        .layer(create_cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::span!(
                        target: "devlab-api",
                        tracing::Level::DEBUG,
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %uuid::Uuid::new_v4(),
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    tracing::debug!(target: "devlab-api", "📥 Incoming request: {} {}", request.method(), request.uri());
                })
                .on_response(|response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::debug!(
                        target: "devlab-api",
                        "📤 Response: status={}, latency={:?}",
                        response.status(),
                        latency
                    );
                })
                .on_failure(|_error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(target: "devlab-api", "❌ Request failed, latency={:?}", latency);
                })
        )
}

/// Create V1 API router
/// Format: /v1/{module}/{snake_case_endpoint}
fn create_v1_router() -> Router<ApiState> {
    use crate::endpoints::{assessment, auth, comparison, datasets, devices, probability, profile, system};

    Router::new()
        // ===== AUTH MODULE (3 endpoints) =====
        .route("/auth/register", axum::routing::post(auth::post_register))
        .route("/auth/token", axum::routing::post(auth::post_token))
        .route("/auth/token/refresh", axum::routing::post(auth::post_token_refresh))

        // ===== DEVICES MODULE (5 endpoints) =====
        .route("/devices",
            get(devices::get_devices).post(devices::post_device))
        .route("/devices/:device_id",
            get(devices::get_device)
            .patch(devices::patch_device)
            .delete(devices::delete_device))

        // ===== PROBABILITY_DATASETS MODULE (5 endpoints) =====
        .route("/probability_datasets",
            get(datasets::get_probability_datasets).post(datasets::post_probability_dataset))
        .route("/probability_datasets/:dataset_id",
            get(datasets::get_probability_dataset)
            .patch(datasets::patch_probability_dataset)
            .delete(datasets::delete_probability_dataset))

        // ===== ASSESS MODULE (2 endpoints) =====
        .route("/assess/damage", axum::routing::post(assessment::post_assess_damage))
        .route("/assess/link", axum::routing::post(assessment::post_assess_link))

        // ===== PROBABILITY MODULE (1 endpoint) =====
        .route("/probability/calculate", axum::routing::post(probability::post_probability_calculate))

        // ===== COMPARE MODULE (1 endpoint) =====
        .route("/compare", axum::routing::post(comparison::post_compare))

        // ===== PROFILE MODULE (2 endpoints) =====
        .route("/profile",
            get(profile::get_profile).patch(profile::patch_profile))

        // ===== SYSTEM MODULE (2 endpoints) =====
        .route("/system/health_check", get(system::get_health_check))
        .route("/system/version", get(system::get_version))
}

/// Root handler redirecting to the OpenAPI document
async fn root_redirect() -> Redirect {
    Redirect::temporary("/api-docs/openapi.json")
}

/// Middleware to log request and response bodies for debugging
async fn log_request_response_bodies(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    // Only log bodies for POST/PUT/PATCH requests
    let should_log_request = matches!(parts.method.as_str(), "POST" | "PUT" | "PATCH");

    let body_bytes = if should_log_request {
        match body.collect().await {
            Ok(collected) => {
                let bytes = collected.to_bytes();
                if let Ok(body_str) = String::from_utf8(bytes.to_vec()) {
                    if !body_str.is_empty() {
                        tracing::debug!(target: "devlab-api", "📥 Request body: {}", body_str);
                    }
                }
                bytes
            }
            Err(_) => {
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    } else {
        axum::body::Bytes::new()
    };

    // Reconstruct request with original body
    let request = Request::from_parts(parts, Body::from(body_bytes));

    let response = next.run(request).await;

    // Log response body
    let (parts, body) = response.into_parts();

    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            // Only log JSON responses that are not too large
            if bytes.len() < 10000 {
                if let Ok(body_str) = String::from_utf8(bytes.to_vec()) {
                    if !body_str.is_empty() && body_str.starts_with('{') {
                        tracing::debug!(target: "devlab-api", "📤 Response body: {}", body_str);
                    }
                }
            }
            Ok(Response::from_parts(parts, Body::from(bytes)))
        }
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
