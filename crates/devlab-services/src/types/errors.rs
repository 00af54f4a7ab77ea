// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer error types.

Transport-agnostic errors that can be mapped to HTTP status codes
by adapters.
*/

use thiserror::Error;

/// Service layer errors (transport-agnostic)
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// Resource not found (404 in HTTP)
    #[error("Not found: {resource} with id '{id}'")]
    NotFound { resource: String, id: String },

    /// Invalid input parameters (400 in HTTP)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource already exists (409 in HTTP)
    #[error("Already exists: {resource} with id '{id}'")]
    AlreadyExists { resource: String, id: String },

    /// Missing or invalid credentials (401 in HTTP)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Operation not permitted (403 in HTTP)
    #[error("Operation not permitted: {0}")]
    Forbidden(String),

    /// Internal service error (500 in HTTP)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Storage backend error (500 in HTTP)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

// ============================================================================
// ERROR CONVERSIONS FROM BACKEND
// ============================================================================

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => ServiceError::NotFound {
                resource: "Row".to_string(),
                id: String::new(),
            },
            other => ServiceError::Storage(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}
