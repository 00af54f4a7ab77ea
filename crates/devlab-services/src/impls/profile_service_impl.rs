// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Profile service implementation

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;

use crate::storage::Store;
use crate::traits::ProfileService;
use crate::types::dtos::{Profile, ProfilePatch};
use crate::types::errors::{ServiceError, ServiceResult};

/// Implementation of the profile service
pub struct ProfileServiceImpl {
    store: Arc<Store>,
}

impl ProfileServiceImpl {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    fn fetch_or_create(&self, user_id: i64) -> ServiceResult<Profile> {
        let conn = self.store.conn();

        let row = conn
            .query_row(
                "SELECT user_configs, active_config_id FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        if let Some((user_configs, active_config_id)) = row {
            return Ok(Profile {
                user_configs: serde_json::from_str(&user_configs).map_err(|e| {
                    ServiceError::Storage(format!("bad user_configs column: {}", e))
                })?,
                active_config_id,
            });
        }

        // Profile rows are normally created with the account; this covers
        // accounts that predate the profiles table.
        conn.execute("INSERT INTO profiles (user_id) VALUES (?1)", params![user_id])?;
        Ok(Profile::default())
    }
}

#[async_trait]
impl ProfileService for ProfileServiceImpl {
    async fn get_or_create_profile(&self, user_id: i64) -> ServiceResult<Profile> {
        self.fetch_or_create(user_id)
    }

    async fn update_profile(&self, user_id: i64, patch: ProfilePatch) -> ServiceResult<Profile> {
        let mut profile = self.fetch_or_create(user_id)?;

        if let Some(user_configs) = patch.user_configs {
            if !user_configs.is_array() {
                return Err(ServiceError::InvalidInput(
                    "user_configs must be a list".to_string(),
                ));
            }
            profile.user_configs = user_configs;
        }
        if let Some(active_config_id) = patch.active_config_id {
            profile.active_config_id = active_config_id;
        }

        let configs_json = serde_json::to_string(&profile.user_configs)?;

        let conn = self.store.conn();
        conn.execute(
            "UPDATE profiles SET user_configs = ?1, active_config_id = ?2 WHERE user_id = ?3",
            params![configs_json, profile.active_config_id, user_id],
        )?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::AccountServiceImpl;
    use crate::traits::AccountService;
    use serde_json::json;

    async fn service_with_user() -> (ProfileServiceImpl, i64) {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let accounts = AccountServiceImpl::new(store.clone());
        let user = accounts.create_user("alice", "h").await.unwrap();
        (ProfileServiceImpl::new(store), user.id)
    }

    #[tokio::test]
    async fn test_fresh_profile_has_defaults() {
        let (svc, user_id) = service_with_user().await;
        let profile = svc.get_or_create_profile(user_id).await.unwrap();
        assert_eq!(profile.active_config_id, "default");
        assert_eq!(profile.user_configs, json!([]));
    }

    #[tokio::test]
    async fn test_update_roundtrips_configs_verbatim() {
        let (svc, user_id) = service_with_user().await;
        let configs = json!([
            {"id": 1678886400000i64, "name": "my gpt-4", "llm_api_url": "https://api.example.com",
             "llm_api_key": "sk-...", "llm_model_name": "gpt-4"}
        ]);

        let updated = svc
            .update_profile(
                user_id,
                ProfilePatch {
                    user_configs: Some(configs.clone()),
                    active_config_id: Some("1678886400000".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.user_configs, configs);

        let fetched = svc.get_or_create_profile(user_id).await.unwrap();
        assert_eq!(fetched.user_configs, configs);
        assert_eq!(fetched.active_config_id, "1678886400000");
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_field() {
        let (svc, user_id) = service_with_user().await;
        svc.update_profile(
            user_id,
            ProfilePatch {
                user_configs: Some(json!([{"id": 1, "name": "a"}])),
                active_config_id: None,
            },
        )
        .await
        .unwrap();

        let updated = svc
            .update_profile(
                user_id,
                ProfilePatch {
                    user_configs: None,
                    active_config_id: Some("1".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user_configs, json!([{"id": 1, "name": "a"}]));
        assert_eq!(updated.active_config_id, "1");
    }

    #[tokio::test]
    async fn test_non_list_configs_rejected() {
        let (svc, user_id) = service_with_user().await;
        let err = svc
            .update_profile(
                user_id,
                ProfilePatch {
                    user_configs: Some(json!({"not": "a list"})),
                    active_config_id: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_missing_row_is_created_on_read() {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let svc = ProfileServiceImpl::new(store.clone());
        // No matching users row; foreign keys would reject the insert, so
        // seed a user directly.
        store
            .conn()
            .execute(
                "INSERT INTO users (id, username, password_hash, created_at) \
                 VALUES (7, 'bob', 'h', '2025-01-01T00:00:00+00:00')",
                [],
            )
            .unwrap();

        let profile = svc.get_or_create_profile(7).await.unwrap();
        assert_eq!(profile.active_config_id, "default");
    }
}
