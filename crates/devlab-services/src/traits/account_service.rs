// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Account service trait
//!
//! Stores user records with pre-hashed passwords. Password hashing and
//! verification happen at the security boundary of the transport layer;
//! this service never sees a plaintext password.

use async_trait::async_trait;

use crate::types::dtos::UserRecord;
use crate::types::errors::ServiceResult;

/// Service for user accounts
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create a user (and their empty profile row); fails with
    /// `AlreadyExists` on duplicate username
    async fn create_user(&self, username: &str, password_hash: &str) -> ServiceResult<UserRecord>;

    /// Look up a user for credential verification
    async fn get_user_by_username(&self, username: &str) -> ServiceResult<UserRecord>;

    /// Look up a user by id (token subjects)
    async fn get_user(&self, id: i64) -> ServiceResult<UserRecord>;
}
