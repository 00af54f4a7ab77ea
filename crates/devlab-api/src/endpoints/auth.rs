// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Account and token endpoints - `/v1/auth/*`

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::common::{ApiError, ApiResult, Json, State};
use crate::common::types::ApiState;
use crate::security::{hash_password, verify_password, TokenType};

// ============================================================================
// REQUEST/RESPONSE MODELS
// ============================================================================

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Register a new account. The profile row is created along with the user.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Blank username or password"),
        (status = 409, description = "Username already taken")
    ),
    tag = "auth"
)]
pub async fn post_register(
    State(state): State<ApiState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    if request.username.trim().is_empty() || request.password.trim().is_empty() {
        return Err(ApiError::invalid_input(
            "username and password must not be blank",
        ));
    }

    let password_hash =
        hash_password(&request.password).map_err(|e| ApiError::internal(e.to_string()))?;

    let user = state
        .account_service
        .create_user(request.username.trim(), &password_hash)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// Exchange credentials for an access/refresh token pair
#[utoipa::path(
    post,
    path = "/v1/auth/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPairResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn post_token(
    State(state): State<ApiState>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<Json<TokenPairResponse>> {
    // A missing user and a bad password report the same way
    let invalid = || ApiError::unauthorized("invalid username or password");

    let user = state
        .account_service
        .get_user_by_username(&request.username)
        .await
        .map_err(|_| invalid())?;

    let verified = verify_password(&request.password, &user.password_hash)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !verified {
        return Err(invalid());
    }

    let pair = state
        .token_signer
        .issue_pair(user.id, &user.username)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// Exchange a refresh token for a fresh access token
#[utoipa::path(
    post,
    path = "/v1/auth/token/refresh",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "Access token issued", body = AccessTokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "auth"
)]
pub async fn post_token_refresh(
    State(state): State<ApiState>,
    Json(request): Json<TokenRefreshRequest>,
) -> ApiResult<Json<AccessTokenResponse>> {
    let claims = state
        .token_signer
        .verify(&request.refresh, TokenType::Refresh)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    // The account may have been removed since the refresh token was issued
    let user = state
        .account_service
        .get_user(claims.sub)
        .await
        .map_err(|_| ApiError::unauthorized("unknown account"))?;

    let access = state
        .token_signer
        .issue(user.id, &user.username, TokenType::Access)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(AccessTokenResponse { access }))
}
