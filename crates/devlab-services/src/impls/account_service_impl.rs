// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Account service implementation
//!
//! Creating a user also creates the user's profile row, so profile reads
//! never race against account creation.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use tracing::info;

use crate::storage::{is_unique_violation, parse_datetime, Store};
use crate::traits::AccountService;
use crate::types::dtos::UserRecord;
use crate::types::errors::{ServiceError, ServiceResult};

/// Implementation of the account service
pub struct AccountServiceImpl {
    store: Arc<Store>,
}

impl AccountServiceImpl {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    fn decode(
        id: i64,
        username: String,
        password_hash: String,
        created_at: String,
    ) -> ServiceResult<UserRecord> {
        Ok(UserRecord {
            id,
            username,
            password_hash,
            created_at: parse_datetime(&created_at)?,
        })
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn create_user(&self, username: &str, password_hash: &str) -> ServiceResult<UserRecord> {
        if username.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "username must not be blank".to_string(),
            ));
        }

        let created_at = Utc::now();

        let id = {
            let conn = self.store.conn();
            let result = conn.execute(
                "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
                params![username, password_hash, created_at.to_rfc3339()],
            );
            let id = match result {
                Ok(_) => conn.last_insert_rowid(),
                Err(e) if is_unique_violation(&e) => {
                    return Err(ServiceError::AlreadyExists {
                        resource: "User".to_string(),
                        id: username.to_string(),
                    })
                }
                Err(e) => return Err(e.into()),
            };

            conn.execute(
                "INSERT INTO profiles (user_id) VALUES (?1)",
                params![id],
            )?;
            id
        };

        info!(target: "devlab-services", "Registered user '{}' ({})", username, id);

        Ok(UserRecord {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }

    async fn get_user_by_username(&self, username: &str) -> ServiceResult<UserRecord> {
        let conn = self.store.conn();
        let row = conn
            .query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, username, password_hash, created_at)) => {
                Self::decode(id, username, password_hash, created_at)
            }
            None => Err(ServiceError::NotFound {
                resource: "User".to_string(),
                id: username.to_string(),
            }),
        }
    }

    async fn get_user(&self, id: i64) -> ServiceResult<UserRecord> {
        let conn = self.store.conn();
        let row = conn
            .query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, username, password_hash, created_at)) => {
                Self::decode(id, username, password_hash, created_at)
            }
            None => Err(ServiceError::NotFound {
                resource: "User".to_string(),
                id: id.to_string(),
            }),
        }
    }
}
