// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! User profile endpoints - `/v1/profile`
//!
//! Stores the per-user list of LLM API configurations and the active
//! selector. Reads also surface the server-wide defaults so clients can
//! offer a "default" choice without extra round-trips.

use serde::{Deserialize, Serialize};

use devlab_services::ProfilePatch;

use crate::common::types::ApiState;
use crate::common::{ApiResult, Json, State};
use crate::security::AuthContext;

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

/// Server-wide default LLM API configuration
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DefaultLlmConfig {
    pub llm_api_url: String,
    pub llm_api_key: String,
    pub llm_model_name: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    /// List of named API-configuration objects, stored verbatim
    #[schema(value_type = Object)]
    pub user_configs: serde_json::Value,
    /// `"default"` or the id of one of `user_configs`
    pub active_config_id: String,
    pub default_config: DefaultLlmConfig,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(value_type = Object)]
    pub user_configs: Option<serde_json::Value>,
    pub active_config_id: Option<String>,
}

fn default_config(state: &ApiState) -> DefaultLlmConfig {
    DefaultLlmConfig {
        llm_api_url: state.llm_defaults.default_api_url.clone(),
        llm_api_key: state.llm_defaults.default_api_key.clone(),
        llm_model_name: state.llm_defaults.default_model_name.clone(),
    }
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Current user's profile (created on first access)
#[utoipa::path(
    get,
    path = "/v1/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Authentication required")
    ),
    tag = "profile"
)]
pub async fn get_profile(
    State(state): State<ApiState>,
    auth: AuthContext,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = auth.require_auth()?;

    let profile = state.profile_service.get_or_create_profile(user_id).await?;

    Ok(Json(ProfileResponse {
        user_configs: profile.user_configs,
        active_config_id: profile.active_config_id,
        default_config: default_config(&state),
    }))
}

/// Partially update the current user's profile
#[utoipa::path(
    patch,
    path = "/v1/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "user_configs is not a list"),
        (status = 401, description = "Authentication required")
    ),
    tag = "profile"
)]
pub async fn patch_profile(
    State(state): State<ApiState>,
    auth: AuthContext,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = auth.require_auth()?;

    let profile = state
        .profile_service
        .update_profile(
            user_id,
            ProfilePatch {
                user_configs: request.user_configs,
                active_config_id: request.active_config_id,
            },
        )
        .await?;

    Ok(Json(ProfileResponse {
        user_configs: profile.user_configs,
        active_config_id: profile.active_config_id,
        default_config: default_config(&state),
    }))
}
