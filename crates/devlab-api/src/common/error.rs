use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// API error codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    NotFound,
    InvalidInput,
    AlreadyExists,
    Internal,
    Unauthorized,
    Forbidden,
}

/// API error type
#[derive(Debug, Error, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error detail message
    pub detail: String,

    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ApiErrorCode>,

    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            code: None,
            details: None,
        }
    }

    pub fn with_code(mut self, code: ApiErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        let resource = resource.into();
        let id = id.into();
        Self::new(format!("{} '{}' not found", resource, id))
            .with_code(ApiErrorCode::NotFound)
            .with_details(serde_json::json!({
                "resource": resource,
                "id": id
            }))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::InvalidInput)
    }

    pub fn already_exists(resource: impl Into<String>, id: impl Into<String>) -> Self {
        let resource = resource.into();
        let id = id.into();
        Self::new(format!("{} '{}' already exists", resource, id))
            .with_code(ApiErrorCode::AlreadyExists)
            .with_details(serde_json::json!({
                "resource": resource,
                "id": id
            }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::Unauthorized)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::Forbidden)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::Internal)
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self.code {
            Some(ApiErrorCode::NotFound) => StatusCode::NOT_FOUND,
            Some(ApiErrorCode::InvalidInput) => StatusCode::BAD_REQUEST,
            Some(ApiErrorCode::AlreadyExists) => StatusCode::CONFLICT,
            Some(ApiErrorCode::Unauthorized) => StatusCode::UNAUTHORIZED,
            Some(ApiErrorCode::Forbidden) => StatusCode::FORBIDDEN,
            Some(ApiErrorCode::Internal) | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), axum::Json(self)).into_response()
    }
}

/// Convert service layer errors to API errors
impl From<devlab_services::ServiceError> for ApiError {
    fn from(err: devlab_services::ServiceError) -> Self {
        use devlab_services::ServiceError;

        match err {
            ServiceError::NotFound { resource, id } => {
                ApiError::new(format!("{} '{}' not found", resource, id))
                    .with_code(ApiErrorCode::NotFound)
                    .with_details(serde_json::json!({"resource": resource, "id": id}))
            }
            ServiceError::InvalidInput(msg) => ApiError::new(msg).with_code(ApiErrorCode::InvalidInput),
            ServiceError::AlreadyExists { resource, id } => {
                ApiError::new(format!("{} '{}' already exists", resource, id))
                    .with_code(ApiErrorCode::AlreadyExists)
                    .with_details(serde_json::json!({"resource": resource, "id": id}))
            }
            ServiceError::Unauthorized(msg) => ApiError::new(msg).with_code(ApiErrorCode::Unauthorized),
            ServiceError::Forbidden(msg) => ApiError::new(msg).with_code(ApiErrorCode::Forbidden),
            ServiceError::Internal(msg) => ApiError::new(msg).with_code(ApiErrorCode::Internal),
            ServiceError::Storage(msg) => ApiError::new(msg).with_code(ApiErrorCode::Internal),
        }
    }
}
