// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Assessment endpoints - `/v1/assess/*`
//!
//! Thin DTO translation over the calculators in devlab-services. dB
//! values are rounded to 3 decimals at this boundary.

use serde::{Deserialize, Serialize};

use devlab_services::assessment::{
    assess_damage, assess_link, DamageInputs, LinkInputs, LinkStatus, RiskLevel,
};

use crate::common::{ApiResult, Json};
use crate::endpoints::round_dp;
use crate::security::AuthContext;

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

/// Missing numeric fields default to 0 and fail the positivity check,
/// mirroring the validation behavior of the calculators.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct DamageAssessmentRequest {
    /// Transmit power in GW
    #[serde(default)]
    pub pt_gw: f64,
    #[serde(default)]
    pub gt_db: f64,
    #[serde(default)]
    pub gr_db: f64,
    /// Frequency in GHz
    #[serde(default)]
    pub f_ghz: f64,
    /// Distance in km
    #[serde(default)]
    pub d_km: f64,
    #[serde(default)]
    pub lna_gain_db: f64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DamageAssessmentResponse {
    pub ls_db: f64,
    pub pr_dbm: f64,
    pub lna_gain_db: f64,
    pub limiter_loss_db: f64,
    /// `low`, `medium`, or `high`
    pub risk_level: String,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LinkAssessmentRequest {
    /// Transmit power in kW
    #[serde(default)]
    pub pt2_kw: f64,
    #[serde(default)]
    pub gt2_db: f64,
    #[serde(default)]
    pub gr2_db: f64,
    #[serde(default)]
    pub f2_ghz: f64,
    #[serde(default)]
    pub d2_km: f64,
    #[serde(default)]
    pub receiver_sensitivity_dbm: f64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LinkAssessmentResponse {
    pub lp_db: f64,
    pub link_margin_db: f64,
    /// `normal` or `broken`
    pub link_status: String,
}

fn risk_label(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "low",
        RiskLevel::Medium => "medium",
        RiskLevel::High => "high",
    }
}

fn link_label(status: LinkStatus) -> &'static str {
    match status {
        LinkStatus::Normal => "normal",
        LinkStatus::Broken => "broken",
    }
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Electromagnetic damage assessment
#[utoipa::path(
    post,
    path = "/v1/assess/damage",
    request_body = DamageAssessmentRequest,
    responses(
        (status = 200, description = "Assessment result", body = DamageAssessmentResponse),
        (status = 400, description = "Non-positive power, frequency or distance"),
        (status = 401, description = "Authentication required")
    ),
    tag = "assess"
)]
pub async fn post_assess_damage(
    auth: AuthContext,
    Json(request): Json<DamageAssessmentRequest>,
) -> ApiResult<Json<DamageAssessmentResponse>> {
    auth.require_auth()?;

    let result = assess_damage(&DamageInputs {
        pt_gw: request.pt_gw,
        gt_db: request.gt_db,
        gr_db: request.gr_db,
        f_ghz: request.f_ghz,
        d_km: request.d_km,
        lna_gain_db: request.lna_gain_db,
    })?;

    Ok(Json(DamageAssessmentResponse {
        ls_db: round_dp(result.ls_db, 3),
        pr_dbm: round_dp(result.pr_dbm, 3),
        lna_gain_db: result.lna_gain_db,
        limiter_loss_db: result.limiter_loss_db,
        risk_level: risk_label(result.risk_level).to_string(),
    }))
}

/// Communication-link budget assessment
#[utoipa::path(
    post,
    path = "/v1/assess/link",
    request_body = LinkAssessmentRequest,
    responses(
        (status = 200, description = "Assessment result", body = LinkAssessmentResponse),
        (status = 400, description = "Non-positive power, frequency or distance"),
        (status = 401, description = "Authentication required")
    ),
    tag = "assess"
)]
pub async fn post_assess_link(
    auth: AuthContext,
    Json(request): Json<LinkAssessmentRequest>,
) -> ApiResult<Json<LinkAssessmentResponse>> {
    auth.require_auth()?;

    let result = assess_link(&LinkInputs {
        pt2_kw: request.pt2_kw,
        gt2_db: request.gt2_db,
        gr2_db: request.gr2_db,
        f2_ghz: request.f2_ghz,
        d2_km: request.d2_km,
        receiver_sensitivity_dbm: request.receiver_sensitivity_dbm,
    })?;

    Ok(Json(LinkAssessmentResponse {
        lp_db: round_dp(result.lp_db, 3),
        link_margin_db: round_dp(result.link_margin_db, 3),
        link_status: link_label(result.link_status).to_string(),
    }))
}
