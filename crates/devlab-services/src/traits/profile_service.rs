// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Profile service trait

use async_trait::async_trait;

use crate::types::dtos::{Profile, ProfilePatch};
use crate::types::errors::ServiceResult;

/// Service for per-user LLM API configuration
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Profile for the user, creating the default row if missing
    async fn get_or_create_profile(&self, user_id: i64) -> ServiceResult<Profile>;

    /// Partially update the user's profile, creating it first if missing
    async fn update_profile(&self, user_id: i64, patch: ProfilePatch) -> ServiceResult<Profile>;
}
