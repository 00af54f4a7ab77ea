// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Probability dataset service implementation

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use tracing::info;

use crate::storage::{is_unique_violation, parse_datetime, Store};
use crate::traits::DatasetService;
use crate::types::dtos::{DatasetPatch, NewDataset, ProbabilityDataSet};
use crate::types::errors::{ServiceError, ServiceResult};

/// Implementation of the probability dataset store
pub struct DatasetServiceImpl {
    store: Arc<Store>,
}

impl DatasetServiceImpl {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    fn decode(
        id: i64,
        name: String,
        data: String,
        created_at: String,
    ) -> ServiceResult<ProbabilityDataSet> {
        Ok(ProbabilityDataSet {
            id,
            name,
            data: serde_json::from_str(&data)
                .map_err(|e| ServiceError::Storage(format!("bad dataset data column: {}", e)))?,
            created_at: parse_datetime(&created_at)?,
        })
    }

    fn fetch_dataset(&self, id: i64) -> ServiceResult<ProbabilityDataSet> {
        let conn = self.store.conn();
        let row = conn
            .query_row(
                "SELECT id, name, data, created_at FROM probability_datasets WHERE id = ?1",
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
            Some((id, name, data, created_at)) => Self::decode(id, name, data, created_at),
            None => Err(ServiceError::NotFound {
                resource: "ProbabilityDataSet".to_string(),
                id: id.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DatasetService for DatasetServiceImpl {
    async fn list_datasets(&self) -> ServiceResult<Vec<ProbabilityDataSet>> {
        let rows = {
            let conn = self.store.conn();
            let mut stmt = conn.prepare(
                "SELECT id, name, data, created_at FROM probability_datasets \
                 ORDER BY created_at DESC, id DESC",
            )?;
            let mapped = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?;

            let mut rows = Vec::new();
            for row in mapped {
                rows.push(row?);
            }
            rows
        };

        rows.into_iter()
            .map(|(id, name, data, created_at)| Self::decode(id, name, data, created_at))
            .collect()
    }

    async fn get_dataset(&self, id: i64) -> ServiceResult<ProbabilityDataSet> {
        self.fetch_dataset(id)
    }

    async fn create_dataset(&self, dataset: NewDataset) -> ServiceResult<ProbabilityDataSet> {
        if dataset.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("name must not be blank".to_string()));
        }

        let created_at = Utc::now();
        let data_json = serde_json::to_string(&dataset.data)?;

        let id = {
            let conn = self.store.conn();
            let result = conn.execute(
                "INSERT INTO probability_datasets (name, data, created_at) VALUES (?1, ?2, ?3)",
                params![dataset.name, data_json, created_at.to_rfc3339()],
            );
            match result {
                Ok(_) => conn.last_insert_rowid(),
                Err(e) if is_unique_violation(&e) => {
                    return Err(ServiceError::AlreadyExists {
                        resource: "ProbabilityDataSet".to_string(),
                        id: dataset.name.clone(),
                    })
                }
                Err(e) => return Err(e.into()),
            }
        };

        info!(target: "devlab-services", "Created probability dataset '{}' ({})", dataset.name, id);
        self.fetch_dataset(id)
    }

    async fn update_dataset(
        &self,
        id: i64,
        patch: DatasetPatch,
    ) -> ServiceResult<ProbabilityDataSet> {
        let mut dataset = self.fetch_dataset(id)?;

        if let Some(name) = patch.name {
            dataset.name = name;
        }
        if let Some(data) = patch.data {
            dataset.data = data;
        }

        let data_json = serde_json::to_string(&dataset.data)?;

        {
            let conn = self.store.conn();
            let result = conn.execute(
                "UPDATE probability_datasets SET name = ?1, data = ?2 WHERE id = ?3",
                params![dataset.name, data_json, id],
            );
            if let Err(e) = result {
                if is_unique_violation(&e) {
                    return Err(ServiceError::AlreadyExists {
                        resource: "ProbabilityDataSet".to_string(),
                        id: dataset.name.clone(),
                    });
                }
                return Err(e.into());
            }
        }

        self.fetch_dataset(id)
    }

    async fn delete_dataset(&self, id: i64) -> ServiceResult<()> {
        let conn = self.store.conn();
        let deleted = conn.execute(
            "DELETE FROM probability_datasets WHERE id = ?1",
            params![id],
        )?;
        if deleted == 0 {
            return Err(ServiceError::NotFound {
                resource: "ProbabilityDataSet".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> DatasetServiceImpl {
        DatasetServiceImpl::new(Arc::new(Store::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_data_roundtrips_verbatim() {
        let svc = service();
        let curve = json!({"x": [0.0, 1.0, 2.0], "y": [0.1, 0.5, 0.9], "unit": "kV/m"});
        let created = svc
            .create_dataset(NewDataset {
                name: "breakdown".to_string(),
                data: curve.clone(),
            })
            .await
            .unwrap();

        let fetched = svc.get_dataset(created.id).await.unwrap();
        assert_eq!(fetched.data, curve);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let svc = service();
        svc.create_dataset(NewDataset {
            name: "breakdown".to_string(),
            data: json!({}),
        })
        .await
        .unwrap();

        let err = svc
            .create_dataset(NewDataset {
                name: "breakdown".to_string(),
                data: json!({}),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_patch_data_only() {
        let svc = service();
        let created = svc
            .create_dataset(NewDataset {
                name: "breakdown".to_string(),
                data: json!({"x": []}),
            })
            .await
            .unwrap();

        let updated = svc
            .update_dataset(
                created.id,
                DatasetPatch {
                    name: None,
                    data: Some(json!({"x": [1]})),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "breakdown");
        assert_eq!(updated.data, json!({"x": [1]}));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let svc = service();
        let err = svc.delete_dataset(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
