// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device comparison endpoint - `/v1/compare`
//!
//! A read-shaped POST: the body carries the query, nothing is mutated,
//! so no token is required.

use serde::{Deserialize, Serialize};

use devlab_services::comparison::{compare_devices, ParamFilter};

use crate::common::types::ApiState;
use crate::common::{ApiError, ApiResult, Json, State};
use crate::endpoints::devices::ExperimentTableDto;

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

/// One requested parameter range; blank bounds are open
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ParamFilterDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ComparisonRequest {
    pub device_type: Option<String>,
    pub experiment_type: Option<String>,
    #[serde(default)]
    pub fixed_params: Vec<ParamFilterDto>,
}

/// A device that passed the filter, carrying only the matching table
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FilteredDeviceResponse {
    pub id: i64,
    pub name: String,
    pub device_number: String,
    pub device_specific_data: Vec<ExperimentTableDto>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ComparisonResponse {
    pub filtered_devices: Vec<FilteredDeviceResponse>,
    /// Sorted union of header names across all candidates
    pub available_params: Vec<String>,
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Compare devices of a type over one experiment's grid data
#[utoipa::path(
    post,
    path = "/v1/compare",
    request_body = ComparisonRequest,
    responses(
        (status = 200, description = "Filter outcome", body = ComparisonResponse),
        (status = 400, description = "Missing device_type or experiment_type, or unparsable bound")
    ),
    tag = "compare"
)]
pub async fn post_compare(
    State(state): State<ApiState>,
    Json(request): Json<ComparisonRequest>,
) -> ApiResult<Json<ComparisonResponse>> {
    let device_type = request
        .device_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("device_type and experiment_type are required"))?;
    let experiment_type = request
        .experiment_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("device_type and experiment_type are required"))?;

    let candidates = state
        .device_service
        .candidates_for_comparison(device_type, experiment_type)
        .await?;

    let filters: Vec<ParamFilter> = request
        .fixed_params
        .iter()
        .map(|f| ParamFilter {
            name: f.name.clone(),
            min: f.min.clone(),
            max: f.max.clone(),
        })
        .collect();

    let outcome = compare_devices(&candidates, experiment_type, &filters)?;

    Ok(Json(ComparisonResponse {
        filtered_devices: outcome
            .matches
            .into_iter()
            .map(|m| FilteredDeviceResponse {
                id: m.id,
                name: m.name,
                device_number: m.device_number,
                device_specific_data: vec![ExperimentTableDto::from(m.table)],
            })
            .collect(),
        available_params: outcome.available_params,
    }))
}
