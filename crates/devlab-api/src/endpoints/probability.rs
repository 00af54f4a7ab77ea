// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! System failure probability endpoint - `/v1/probability/calculate`

use serde::{Deserialize, Serialize};

use devlab_services::assessment::{system_failure_probability, FailureComponent};

use crate::common::{ApiResult, Json};
use crate::endpoints::round_dp;
use crate::security::AuthContext;

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct FailureComponentDto {
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub probability: f64,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct FailureProbabilityRequest {
    #[serde(default)]
    pub components: Vec<FailureComponentDto>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FailureProbabilityResponse {
    pub system_failure_probability: f64,
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Weight-normalized system failure probability
#[utoipa::path(
    post,
    path = "/v1/probability/calculate",
    request_body = FailureProbabilityRequest,
    responses(
        (status = 200, description = "Computed probability", body = FailureProbabilityResponse),
        (status = 400, description = "Empty component list"),
        (status = 401, description = "Authentication required")
    ),
    tag = "probability"
)]
pub async fn post_probability_calculate(
    auth: AuthContext,
    Json(request): Json<FailureProbabilityRequest>,
) -> ApiResult<Json<FailureProbabilityResponse>> {
    auth.require_auth()?;

    let components: Vec<FailureComponent> = request
        .components
        .iter()
        .map(|c| FailureComponent {
            weight: c.weight,
            probability: c.probability,
        })
        .collect();

    let probability = system_failure_probability(&components)?;

    Ok(Json(FailureProbabilityResponse {
        system_failure_probability: round_dp(probability, 6),
    }))
}
