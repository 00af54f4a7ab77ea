// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device catalog service trait
//!
//! CRUD over device records plus the list-view projection and the
//! comparison candidate query.

use async_trait::async_trait;

use crate::types::dtos::{Device, DevicePatch, DeviceQuery, DeviceSummary, NewDevice};
use crate::types::errors::ServiceResult;

/// Service for managing the device catalog
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// List devices matching the query, newest first, as list projections
    async fn list_devices(&self, query: DeviceQuery) -> ServiceResult<Vec<DeviceSummary>>;

    /// Full record by id
    async fn get_device(&self, id: i64) -> ServiceResult<Device>;

    /// Create a device; fails with `AlreadyExists` on duplicate device_number
    async fn create_device(&self, params: NewDevice) -> ServiceResult<Device>;

    /// Partially update a device
    async fn update_device(&self, id: i64, patch: DevicePatch) -> ServiceResult<Device>;

    /// Delete a device and its embedded data
    async fn delete_device(&self, id: i64) -> ServiceResult<()>;

    /// Full records of a given device type embedding a table of the given
    /// experiment type, newest first. Used by the comparison filter.
    async fn candidates_for_comparison(
        &self,
        device_type: &str,
        experiment_type: &str,
    ) -> ServiceResult<Vec<Device>>;
}
