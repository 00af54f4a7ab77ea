// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! System API Endpoints - `/v1/system/*`

use serde::{Deserialize, Serialize};

use crate::common::types::ApiState;
use crate::common::{ApiError, ApiResponse, ApiResult, Json, State};

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthCheckResponse {
    /// `healthy` when storage answers queries
    pub status: String,
    pub storage_ok: bool,
    pub device_count: i64,
    pub dataset_count: i64,
    pub user_count: i64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VersionResponse {
    pub version: String,
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Storage reachability and table counters
#[utoipa::path(
    get,
    path = "/v1/system/health_check",
    responses(
        (status = 200, description = "System health retrieved successfully", body = HealthCheckResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "system"
)]
pub async fn get_health_check(
    State(state): State<ApiState>,
) -> ApiResult<Json<ApiResponse<HealthCheckResponse>>> {
    let health = state
        .system_service
        .get_system_health()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get system health: {}", e)))?;

    let response = HealthCheckResponse {
        status: if health.storage_ok {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        storage_ok: health.storage_ok,
        device_count: health.device_count,
        dataset_count: health.dataset_count,
        user_count: health.user_count,
    };

    Ok(Json(ApiResponse::success(response)))
}

/// Crate version
#[utoipa::path(
    get,
    path = "/v1/system/version",
    responses(
        (status = 200, description = "Version string", body = VersionResponse)
    ),
    tag = "system"
)]
pub async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: crate::VERSION.to_string(),
    })
}
