// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! System service implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::storage::Store;
use crate::traits::SystemService;
use crate::types::dtos::SystemHealth;
use crate::types::errors::ServiceResult;

/// Implementation of the system service
pub struct SystemServiceImpl {
    store: Arc<Store>,
}

impl SystemServiceImpl {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    fn count(&self, table: &str) -> rusqlite::Result<i64> {
        self.store
            .conn()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
    }
}

#[async_trait]
impl SystemService for SystemServiceImpl {
    async fn get_system_health(&self) -> ServiceResult<SystemHealth> {
        let device_count = self.count("devices");
        let dataset_count = self.count("probability_datasets");
        let user_count = self.count("users");

        let storage_ok = device_count.is_ok() && dataset_count.is_ok() && user_count.is_ok();

        Ok(SystemHealth {
            storage_ok,
            device_count: device_count.unwrap_or(0),
            dataset_count: dataset_count.unwrap_or(0),
            user_count: user_count.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::AccountServiceImpl;
    use crate::traits::AccountService;

    #[tokio::test]
    async fn test_health_counts_rows() {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let accounts = AccountServiceImpl::new(store.clone());
        accounts.create_user("alice", "h").await.unwrap();

        let svc = SystemServiceImpl::new(store);
        let health = svc.get_system_health().await.unwrap();

        assert!(health.storage_ok);
        assert_eq!(health.user_count, 1);
        assert_eq!(health.device_count, 0);
        assert_eq!(health.dataset_count, 0);
    }
}
