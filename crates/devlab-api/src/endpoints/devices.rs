// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device catalog endpoints - `/v1/devices`
//!
//! The collection is world-readable; mutations require a token.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devlab_services::{
    Device, DevicePatch, DeviceQuery, DeviceSummary, ExperimentTable, NewDevice,
};

use crate::common::types::ApiState;
use crate::common::{ApiResult, Json, Path, Query, State};
use crate::security::{AuthContext, Authorizer, Permission};

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

fn empty_json_array() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

/// One experiment table embedded in a device
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExperimentTableDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub experiment_type: String,
    /// 2D grid of string cells; the first row is the header row
    #[serde(default)]
    pub grid_data: Vec<Vec<String>>,
    /// Free-form CSV file references, stored verbatim
    #[serde(default = "empty_json_array")]
    #[schema(value_type = Object)]
    pub csv_files: serde_json::Value,
}

impl From<ExperimentTable> for ExperimentTableDto {
    fn from(table: ExperimentTable) -> Self {
        Self {
            name: table.name,
            experiment_type: table.experiment_type,
            grid_data: table.grid_data,
            csv_files: table.csv_files,
        }
    }
}

impl From<ExperimentTableDto> for ExperimentTable {
    fn from(dto: ExperimentTableDto) -> Self {
        Self {
            name: dto.name,
            experiment_type: dto.experiment_type,
            grid_data: dto.grid_data,
            csv_files: dto.csv_files,
        }
    }
}

/// Full device record
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeviceResponse {
    pub id: i64,
    pub name: String,
    pub device_type: String,
    pub substrate: String,
    pub device_number: String,
    pub tech_description: Option<String>,
    /// Micrograph as an opaque base64 text blob
    pub photo_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub device_specific_data: Vec<ExperimentTableDto>,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            device_type: device.device_type,
            substrate: device.substrate,
            device_number: device.device_number,
            tech_description: device.tech_description,
            photo_data: device.photo_data,
            created_at: device.created_at,
            device_specific_data: device
                .device_specific_data
                .into_iter()
                .map(ExperimentTableDto::from)
                .collect(),
        }
    }
}

/// Reduced projection for the list view
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeviceSummaryResponse {
    pub id: i64,
    pub name: String,
    pub device_type: String,
    pub substrate: String,
    pub device_number: String,
    pub tech_description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Unique experiment types joined with `/`
    pub test_types_display: String,
}

impl From<DeviceSummary> for DeviceSummaryResponse {
    fn from(summary: DeviceSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            device_type: summary.device_type,
            substrate: summary.substrate,
            device_number: summary.device_number,
            tech_description: summary.tech_description,
            created_at: summary.created_at,
            test_types_display: summary.test_types_display,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub device_type: String,
    pub substrate: String,
    pub device_number: String,
    #[serde(default)]
    pub tech_description: Option<String>,
    #[serde(default)]
    pub photo_data: Option<String>,
    #[serde(default)]
    pub device_specific_data: Vec<ExperimentTableDto>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub substrate: Option<String>,
    pub device_number: Option<String>,
    pub tech_description: Option<String>,
    pub photo_data: Option<String>,
    pub device_specific_data: Option<Vec<ExperimentTableDto>>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeviceListQuery {
    /// Exact match on device_type
    pub device_type: Option<String>,
    /// Substring search over name / device_number / tech_description
    pub search: Option<String>,
    /// Only devices embedding a table of this experiment type
    pub experiment_type: Option<String>,
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// List devices, newest first
#[utoipa::path(
    get,
    path = "/v1/devices",
    params(DeviceListQuery),
    responses(
        (status = 200, description = "Device list", body = [DeviceSummaryResponse])
    ),
    tag = "devices"
)]
pub async fn get_devices(
    State(state): State<ApiState>,
    Query(query): Query<DeviceListQuery>,
) -> ApiResult<Json<Vec<DeviceSummaryResponse>>> {
    let summaries = state
        .device_service
        .list_devices(DeviceQuery {
            device_type: query.device_type,
            search: query.search,
            experiment_type: query.experiment_type,
        })
        .await?;

    Ok(Json(
        summaries
            .into_iter()
            .map(DeviceSummaryResponse::from)
            .collect(),
    ))
}

/// Create a device
#[utoipa::path(
    post,
    path = "/v1/devices",
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Device created", body = DeviceResponse),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Duplicate device_number")
    ),
    tag = "devices"
)]
pub async fn post_device(
    State(state): State<ApiState>,
    auth: AuthContext,
    Json(request): Json<CreateDeviceRequest>,
) -> ApiResult<(StatusCode, Json<DeviceResponse>)> {
    Authorizer::authorize(&auth, Permission::Write)?;

    let device = state
        .device_service
        .create_device(NewDevice {
            name: request.name,
            device_type: request.device_type,
            substrate: request.substrate,
            device_number: request.device_number,
            tech_description: request.tech_description,
            photo_data: request.photo_data,
            device_specific_data: request
                .device_specific_data
                .into_iter()
                .map(ExperimentTable::from)
                .collect(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DeviceResponse::from(device))))
}

/// Full device record
#[utoipa::path(
    get,
    path = "/v1/devices/{device_id}",
    params(("device_id" = i64, Path, description = "Device id")),
    responses(
        (status = 200, description = "Device record", body = DeviceResponse),
        (status = 404, description = "Unknown device")
    ),
    tag = "devices"
)]
pub async fn get_device(
    State(state): State<ApiState>,
    Path(device_id): Path<i64>,
) -> ApiResult<Json<DeviceResponse>> {
    let device = state.device_service.get_device(device_id).await?;
    Ok(Json(DeviceResponse::from(device)))
}

/// Partially update a device
#[utoipa::path(
    patch,
    path = "/v1/devices/{device_id}",
    params(("device_id" = i64, Path, description = "Device id")),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Updated device record", body = DeviceResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Unknown device")
    ),
    tag = "devices"
)]
pub async fn patch_device(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(device_id): Path<i64>,
    Json(request): Json<UpdateDeviceRequest>,
) -> ApiResult<Json<DeviceResponse>> {
    Authorizer::authorize(&auth, Permission::Write)?;

    let device = state
        .device_service
        .update_device(
            device_id,
            DevicePatch {
                name: request.name,
                device_type: request.device_type,
                substrate: request.substrate,
                device_number: request.device_number,
                tech_description: request.tech_description,
                photo_data: request.photo_data,
                device_specific_data: request
                    .device_specific_data
                    .map(|tables| tables.into_iter().map(ExperimentTable::from).collect()),
            },
        )
        .await?;

    Ok(Json(DeviceResponse::from(device)))
}

/// Delete a device and its embedded data
#[utoipa::path(
    delete,
    path = "/v1/devices/{device_id}",
    params(("device_id" = i64, Path, description = "Device id")),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Unknown device")
    ),
    tag = "devices"
)]
pub async fn delete_device(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(device_id): Path<i64>,
) -> ApiResult<StatusCode> {
    Authorizer::authorize(&auth, Permission::Write)?;

    state.device_service.delete_device(device_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
