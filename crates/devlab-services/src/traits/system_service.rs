// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! System service trait

use async_trait::async_trait;

use crate::types::dtos::SystemHealth;
use crate::types::errors::ServiceResult;

/// Service for health checks and counters
#[async_trait]
pub trait SystemService: Send + Sync {
    /// Storage reachability plus row counters
    async fn get_system_health(&self) -> ServiceResult<SystemHealth>;
}
