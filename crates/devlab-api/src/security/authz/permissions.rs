// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Authorization policy
//!
//! The catalog and dataset collections are world-readable; every
//! mutation requires an authenticated principal.

use crate::common::ApiError;
use crate::security::AuthContext;

/// Access level requested by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read a public collection
    Read,
    /// Mutate a public collection
    Write,
}

/// Policy check over the request's auth context
pub struct Authorizer;

impl Authorizer {
    /// Authorize a permission against the context
    pub fn authorize(ctx: &AuthContext, perm: Permission) -> Result<(), AuthzError> {
        match perm {
            Permission::Read => Ok(()),
            Permission::Write if ctx.is_authenticated => Ok(()),
            Permission::Write => Err(AuthzError::new("writing requires authentication")),
        }
    }
}

/// Authorization error
#[derive(Debug, Clone)]
pub struct AuthzError {
    pub message: String,
}

impl AuthzError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AuthzError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthzError {}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        ApiError::unauthorized(err.message)
    }
}
