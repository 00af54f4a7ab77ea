// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Probability dataset endpoints - `/v1/probability_datasets`

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devlab_services::{DatasetPatch, NewDataset, ProbabilityDataSet};

use crate::common::types::ApiState;
use crate::common::{ApiResult, Json, Path, State};
use crate::security::{AuthContext, Authorizer, Permission};

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DatasetResponse {
    pub id: i64,
    pub name: String,
    /// Curve data (e.g. `{"x": [...], "y": [...]}`), stored verbatim
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<ProbabilityDataSet> for DatasetResponse {
    fn from(dataset: ProbabilityDataSet) -> Self {
        Self {
            id: dataset.id,
            name: dataset.name,
            data: dataset.data,
            created_at: dataset.created_at,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateDatasetRequest {
    pub name: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateDatasetRequest {
    pub name: Option<String>,
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// List datasets, newest first
#[utoipa::path(
    get,
    path = "/v1/probability_datasets",
    responses(
        (status = 200, description = "Dataset list", body = [DatasetResponse])
    ),
    tag = "probability_datasets"
)]
pub async fn get_probability_datasets(
    State(state): State<ApiState>,
) -> ApiResult<Json<Vec<DatasetResponse>>> {
    let datasets = state.dataset_service.list_datasets().await?;
    Ok(Json(datasets.into_iter().map(DatasetResponse::from).collect()))
}

/// Create a dataset
#[utoipa::path(
    post,
    path = "/v1/probability_datasets",
    request_body = CreateDatasetRequest,
    responses(
        (status = 201, description = "Dataset created", body = DatasetResponse),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Duplicate dataset name")
    ),
    tag = "probability_datasets"
)]
pub async fn post_probability_dataset(
    State(state): State<ApiState>,
    auth: AuthContext,
    Json(request): Json<CreateDatasetRequest>,
) -> ApiResult<(StatusCode, Json<DatasetResponse>)> {
    Authorizer::authorize(&auth, Permission::Write)?;

    let dataset = state
        .dataset_service
        .create_dataset(NewDataset {
            name: request.name,
            data: request.data,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DatasetResponse::from(dataset))))
}

/// Dataset by id
#[utoipa::path(
    get,
    path = "/v1/probability_datasets/{dataset_id}",
    params(("dataset_id" = i64, Path, description = "Dataset id")),
    responses(
        (status = 200, description = "Dataset record", body = DatasetResponse),
        (status = 404, description = "Unknown dataset")
    ),
    tag = "probability_datasets"
)]
pub async fn get_probability_dataset(
    State(state): State<ApiState>,
    Path(dataset_id): Path<i64>,
) -> ApiResult<Json<DatasetResponse>> {
    let dataset = state.dataset_service.get_dataset(dataset_id).await?;
    Ok(Json(DatasetResponse::from(dataset)))
}

/// Partially update a dataset
#[utoipa::path(
    patch,
    path = "/v1/probability_datasets/{dataset_id}",
    params(("dataset_id" = i64, Path, description = "Dataset id")),
    request_body = UpdateDatasetRequest,
    responses(
        (status = 200, description = "Updated dataset record", body = DatasetResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Unknown dataset")
    ),
    tag = "probability_datasets"
)]
pub async fn patch_probability_dataset(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(dataset_id): Path<i64>,
    Json(request): Json<UpdateDatasetRequest>,
) -> ApiResult<Json<DatasetResponse>> {
    Authorizer::authorize(&auth, Permission::Write)?;

    let dataset = state
        .dataset_service
        .update_dataset(
            dataset_id,
            DatasetPatch {
                name: request.name,
                data: request.data,
            },
        )
        .await?;

    Ok(Json(DatasetResponse::from(dataset)))
}

/// Delete a dataset
#[utoipa::path(
    delete,
    path = "/v1/probability_datasets/{dataset_id}",
    params(("dataset_id" = i64, Path, description = "Dataset id")),
    responses(
        (status = 204, description = "Dataset deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Unknown dataset")
    ),
    tag = "probability_datasets"
)]
pub async fn delete_probability_dataset(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(dataset_id): Path<i64>,
) -> ApiResult<StatusCode> {
    Authorizer::authorize(&auth, Permission::Write)?;

    state.dataset_service.delete_dataset(dataset_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
