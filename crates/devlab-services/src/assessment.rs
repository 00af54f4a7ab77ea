// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Engineering calculators
//!
//! Three stateless assessments over request parameters: electromagnetic
//! damage risk, communication-link budget, and weighted system failure
//! probability. All functions keep full floating-point precision;
//! rounding for presentation happens at the API boundary.

use serde::{Deserialize, Serialize};

use crate::types::errors::{ServiceError, ServiceResult};

/// Fixed insertion loss of the receiver front-end limiter, reported
/// alongside damage assessments.
pub const LIMITER_LOSS_DB: f64 = 1.5;

/// Free-space path loss in dB for a distance in km and frequency in GHz.
///
/// `20*log10(d_km) + 20*log10(f_mhz) + 32.45` with the frequency folded
/// from GHz into MHz.
pub fn path_loss_db(d_km: f64, f_ghz: f64) -> f64 {
    let f_mhz = f_ghz * 1000.0;
    20.0 * d_km.log10() + 20.0 * f_mhz.log10() + 32.45
}

/// Damage risk buckets over received power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Inputs for the electromagnetic damage assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageInputs {
    /// Transmit power in GW
    pub pt_gw: f64,
    /// Transmit antenna gain in dB
    pub gt_db: f64,
    /// Receive antenna gain in dB
    pub gr_db: f64,
    /// Frequency in GHz
    pub f_ghz: f64,
    /// Distance in km
    pub d_km: f64,
    /// LNA gain in dB
    pub lna_gain_db: f64,
}

/// Damage assessment outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageAssessment {
    pub ls_db: f64,
    pub pr_dbm: f64,
    pub lna_gain_db: f64,
    pub limiter_loss_db: f64,
    pub risk_level: RiskLevel,
}

/// Assess electromagnetic damage risk at a receiver front-end.
///
/// Transmit power converts from GW to dBm, free-space path loss is
/// subtracted, and the received power buckets into low/medium/high risk
/// at -40 dBm and -20 dBm.
pub fn assess_damage(inputs: &DamageInputs) -> ServiceResult<DamageAssessment> {
    if inputs.pt_gw <= 0.0 || inputs.f_ghz <= 0.0 || inputs.d_km <= 0.0 {
        return Err(ServiceError::InvalidInput(
            "power, frequency and distance must be positive".to_string(),
        ));
    }

    let pt_dbm = 10.0 * (inputs.pt_gw * 1e9 * 1000.0).log10();
    let ls_db = path_loss_db(inputs.d_km, inputs.f_ghz);
    let pr_dbm = pt_dbm + inputs.gt_db + inputs.gr_db - ls_db + inputs.lna_gain_db;

    let risk_level = if pr_dbm > -20.0 {
        RiskLevel::High
    } else if pr_dbm > -40.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Ok(DamageAssessment {
        ls_db,
        pr_dbm,
        lna_gain_db: inputs.lna_gain_db,
        limiter_loss_db: LIMITER_LOSS_DB,
        risk_level,
    })
}

/// Link status over the computed margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Normal,
    Broken,
}

/// Inputs for the communication-link assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkInputs {
    /// Transmit power in kW
    pub pt2_kw: f64,
    pub gt2_db: f64,
    pub gr2_db: f64,
    pub f2_ghz: f64,
    pub d2_km: f64,
    pub receiver_sensitivity_dbm: f64,
}

/// Link assessment outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAssessment {
    pub lp_db: f64,
    pub link_margin_db: f64,
    pub link_status: LinkStatus,
}

/// Assess a communication link budget.
///
/// Transmit power converts from kW to dBm; the link is `normal` when
/// the margin over receiver sensitivity is strictly positive.
pub fn assess_link(inputs: &LinkInputs) -> ServiceResult<LinkAssessment> {
    if inputs.pt2_kw <= 0.0 || inputs.f2_ghz <= 0.0 || inputs.d2_km <= 0.0 {
        return Err(ServiceError::InvalidInput(
            "power, frequency and distance must be positive".to_string(),
        ));
    }

    let pt2_dbm = 10.0 * (inputs.pt2_kw * 1000.0 * 1000.0).log10();
    let lp_db = path_loss_db(inputs.d2_km, inputs.f2_ghz);
    let pr2_dbm = pt2_dbm + inputs.gt2_db + inputs.gr2_db - lp_db;
    let link_margin_db = pr2_dbm - inputs.receiver_sensitivity_dbm;

    let link_status = if link_margin_db > 0.0 {
        LinkStatus::Normal
    } else {
        LinkStatus::Broken
    };

    Ok(LinkAssessment {
        lp_db,
        link_margin_db,
        link_status,
    })
}

/// A system component with a failure probability and weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureComponent {
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub probability: f64,
}

/// Weight-normalized average of component failure probabilities.
///
/// Returns 0 when the total weight is 0; an empty component list is an
/// input error.
pub fn system_failure_probability(components: &[FailureComponent]) -> ServiceResult<f64> {
    if components.is_empty() {
        return Err(ServiceError::InvalidInput(
            "component list must not be empty".to_string(),
        ));
    }

    let total_weight: f64 = components.iter().map(|c| c.weight).sum();
    if total_weight == 0.0 {
        return Ok(0.0);
    }

    Ok(components
        .iter()
        .map(|c| (c.weight / total_weight) * c.probability)
        .sum())
}
