// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Probability dataset service trait

use async_trait::async_trait;

use crate::types::dtos::{DatasetPatch, NewDataset, ProbabilityDataSet};
use crate::types::errors::ServiceResult;

/// Service for the probability dataset store
#[async_trait]
pub trait DatasetService: Send + Sync {
    /// All datasets, newest first
    async fn list_datasets(&self) -> ServiceResult<Vec<ProbabilityDataSet>>;

    async fn get_dataset(&self, id: i64) -> ServiceResult<ProbabilityDataSet>;

    /// Create a dataset; fails with `AlreadyExists` on duplicate name
    async fn create_dataset(&self, params: NewDataset) -> ServiceResult<ProbabilityDataSet>;

    async fn update_dataset(&self, id: i64, patch: DatasetPatch)
        -> ServiceResult<ProbabilityDataSet>;

    async fn delete_dataset(&self, id: i64) -> ServiceResult<()>;
}
