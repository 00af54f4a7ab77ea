// OpenAPI documentation generation
//
// This module generates the OpenAPI 3.0 specification at compile-time
// using utoipa, ensuring the documentation stays in sync with the code.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::common::ApiError;
use crate::endpoints::assessment::{
    DamageAssessmentRequest, DamageAssessmentResponse, LinkAssessmentRequest,
    LinkAssessmentResponse,
};
use crate::endpoints::auth::{
    AccessTokenResponse, RegisterRequest, RegisterResponse, TokenPairResponse, TokenRefreshRequest,
    TokenRequest,
};
use crate::endpoints::comparison::{
    ComparisonRequest, ComparisonResponse, FilteredDeviceResponse, ParamFilterDto,
};
use crate::endpoints::datasets::{CreateDatasetRequest, DatasetResponse, UpdateDatasetRequest};
use crate::endpoints::devices::{
    CreateDeviceRequest, DeviceResponse, DeviceSummaryResponse, ExperimentTableDto,
    UpdateDeviceRequest,
};
use crate::endpoints::probability::{
    FailureComponentDto, FailureProbabilityRequest, FailureProbabilityResponse,
};
use crate::endpoints::profile::{DefaultLlmConfig, ProfileResponse, UpdateProfileRequest};
use crate::endpoints::system::{HealthCheckResponse, VersionResponse};

/// OpenAPI documentation for the DEVLAB REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DEVLAB REST API",
        version = "1.0.0",
        description = "Device test-data catalog, probability datasets, engineering calculators, and device comparison",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    paths(
        crate::endpoints::auth::post_register,
        crate::endpoints::auth::post_token,
        crate::endpoints::auth::post_token_refresh,
        crate::endpoints::devices::get_devices,
        crate::endpoints::devices::post_device,
        crate::endpoints::devices::get_device,
        crate::endpoints::devices::patch_device,
        crate::endpoints::devices::delete_device,
        crate::endpoints::datasets::get_probability_datasets,
        crate::endpoints::datasets::post_probability_dataset,
        crate::endpoints::datasets::get_probability_dataset,
        crate::endpoints::datasets::patch_probability_dataset,
        crate::endpoints::datasets::delete_probability_dataset,
        crate::endpoints::assessment::post_assess_damage,
        crate::endpoints::assessment::post_assess_link,
        crate::endpoints::probability::post_probability_calculate,
        crate::endpoints::comparison::post_compare,
        crate::endpoints::profile::get_profile,
        crate::endpoints::profile::patch_profile,
        crate::endpoints::system::get_health_check,
        crate::endpoints::system::get_version,
    ),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            TokenRequest,
            TokenPairResponse,
            TokenRefreshRequest,
            AccessTokenResponse,
            ExperimentTableDto,
            DeviceResponse,
            DeviceSummaryResponse,
            CreateDeviceRequest,
            UpdateDeviceRequest,
            DatasetResponse,
            CreateDatasetRequest,
            UpdateDatasetRequest,
            DamageAssessmentRequest,
            DamageAssessmentResponse,
            LinkAssessmentRequest,
            LinkAssessmentResponse,
            FailureComponentDto,
            FailureProbabilityRequest,
            FailureProbabilityResponse,
            ParamFilterDto,
            ComparisonRequest,
            ComparisonResponse,
            FilteredDeviceResponse,
            DefaultLlmConfig,
            ProfileResponse,
            UpdateProfileRequest,
            HealthCheckResponse,
            VersionResponse,
            ApiError,
        )
    ),
    tags(
        (name = "auth", description = "Account registration and token issuance"),
        (name = "devices", description = "Device catalog (CRUD)"),
        (name = "probability_datasets", description = "Probability dataset store"),
        (name = "assess", description = "Damage and link assessments"),
        (name = "probability", description = "System failure probability"),
        (name = "compare", description = "Device comparison filter"),
        (name = "profile", description = "Per-user LLM API configuration"),
        (name = "system", description = "Health and version endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security scheme configuration
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            // JWT Bearer authentication
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"]["/v1/devices"].is_object());
        assert!(json["paths"]["/v1/compare"].is_object());
        assert!(json["components"]["schemas"]["DeviceResponse"].is_object());
    }
}
