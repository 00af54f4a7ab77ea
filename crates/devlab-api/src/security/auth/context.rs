//! Per-request authentication context
//!
//! Extracted by axum from the `Authorization: Bearer` header. Requests
//! without the header proceed anonymously; a header that fails
//! verification rejects the request outright.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::common::ApiError;
use crate::transports::http::server::ApiState;

use super::tokens::TokenType;

/// Authentication method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Anonymous (no credentials presented)
    Anonymous,
    /// JWT bearer token
    Jwt,
}

/// Authentication context for one request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User id when authenticated
    pub user_id: Option<i64>,

    /// Principal name (username, or "anonymous")
    pub principal_id: String,

    /// Authentication method used
    pub auth_method: AuthMethod,

    /// Whether the principal is authenticated
    pub is_authenticated: bool,
}

impl AuthContext {
    /// Create anonymous context (no credentials presented)
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            principal_id: "anonymous".to_string(),
            auth_method: AuthMethod::Anonymous,
            is_authenticated: false,
        }
    }

    /// Create authenticated context from verified claims
    pub fn authenticated(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            principal_id: username.into(),
            auth_method: AuthMethod::Jwt,
            is_authenticated: true,
        }
    }

    /// Require authentication, returning the user id
    pub fn require_auth(&self) -> Result<i64, ApiError> {
        self.user_id
            .filter(|_| self.is_authenticated)
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }
}

#[async_trait]
impl FromRequestParts<ApiState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(AuthContext::anonymous());
        };

        let header = header
            .to_str()
            .map_err(|_| ApiError::unauthorized("malformed authorization header"))?;

        let Some(token) = header.strip_prefix("Bearer ") else {
            return Err(ApiError::unauthorized(
                "authorization header must use the Bearer scheme",
            ));
        };

        let claims = state
            .token_signer
            .verify(token, TokenType::Access)
            .map_err(|e| ApiError::unauthorized(e.to_string()))?;

        Ok(AuthContext::authenticated(claims.sub, claims.username))
    }
}

/// Authentication error
#[derive(Debug, Clone)]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}
