// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device catalog service implementation
//!
//! All device data lives in the `devices` table; the embedded experiment
//! tables are stored verbatim in the `device_specific_data` JSON column.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, ToSql};
use std::sync::Arc;
use tracing::info;

use crate::storage::{is_unique_violation, parse_datetime, Store};
use crate::traits::DeviceService;
use crate::types::dtos::{Device, DevicePatch, DeviceQuery, DeviceSummary, NewDevice};
use crate::types::errors::{ServiceError, ServiceResult};

const DEVICE_COLUMNS: &str = "id, name, device_type, substrate, device_number, \
     tech_description, photo_data, created_at, device_specific_data";

/// Raw row before timestamp/JSON decoding
struct DeviceRow {
    id: i64,
    name: String,
    device_type: String,
    substrate: String,
    device_number: String,
    tech_description: Option<String>,
    photo_data: Option<String>,
    created_at: String,
    device_specific_data: String,
}

impl DeviceRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            device_type: row.get(2)?,
            substrate: row.get(3)?,
            device_number: row.get(4)?,
            tech_description: row.get(5)?,
            photo_data: row.get(6)?,
            created_at: row.get(7)?,
            device_specific_data: row.get(8)?,
        })
    }

    fn decode(self) -> ServiceResult<Device> {
        Ok(Device {
            id: self.id,
            name: self.name,
            device_type: self.device_type,
            substrate: self.substrate,
            device_number: self.device_number,
            tech_description: self.tech_description,
            photo_data: self.photo_data,
            created_at: parse_datetime(&self.created_at)?,
            device_specific_data: serde_json::from_str(&self.device_specific_data)
                .map_err(|e| ServiceError::Storage(format!("bad device data column: {}", e)))?,
        })
    }
}

/// Implementation of the device catalog service
pub struct DeviceServiceImpl {
    store: Arc<Store>,
}

impl DeviceServiceImpl {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    fn fetch_device(&self, id: i64) -> ServiceResult<Device> {
        let conn = self.store.conn();
        let row = conn
            .query_row(
                &format!("SELECT {} FROM devices WHERE id = ?1", DEVICE_COLUMNS),
                params![id],
                DeviceRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => row.decode(),
            None => Err(ServiceError::NotFound {
                resource: "Device".to_string(),
                id: id.to_string(),
            }),
        }
    }

    fn validate(params: &NewDevice) -> ServiceResult<()> {
        if params.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("name must not be blank".to_string()));
        }
        if params.device_number.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "device_number must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceService for DeviceServiceImpl {
    async fn list_devices(&self, query: DeviceQuery) -> ServiceResult<Vec<DeviceSummary>> {
        let search_pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let mut sql = format!("SELECT {} FROM devices", DEVICE_COLUMNS);
        let mut clauses: Vec<&str> = Vec::new();
        let mut bind: Vec<&dyn ToSql> = Vec::new();

        if let Some(device_type) = query.device_type.as_ref() {
            clauses.push("device_type = ?");
            bind.push(device_type);
        }
        if let Some(pattern) = search_pattern.as_ref() {
            clauses.push("(name LIKE ? OR device_number LIKE ? OR tech_description LIKE ?)");
            bind.push(pattern);
            bind.push(pattern);
            bind.push(pattern);
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let devices = {
            let conn = self.store.conn();
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(&bind[..], DeviceRow::from_row)?;

            let mut devices = Vec::new();
            for row in rows {
                devices.push(row?.decode()?);
            }
            devices
        };

        // The experiment-type filter inspects the JSON column, so it runs
        // over the decoded records rather than in SQL.
        let summaries = devices
            .iter()
            .filter(|d| match query.experiment_type.as_deref() {
                Some(experiment_type) => d.table_for(experiment_type).is_some(),
                None => true,
            })
            .map(DeviceSummary::from)
            .collect();

        Ok(summaries)
    }

    async fn get_device(&self, id: i64) -> ServiceResult<Device> {
        self.fetch_device(id)
    }

    async fn create_device(&self, params: NewDevice) -> ServiceResult<Device> {
        Self::validate(&params)?;

        let created_at = Utc::now();
        let data_json = serde_json::to_string(&params.device_specific_data)?;

        let id = {
            let conn = self.store.conn();
            let result = conn.execute(
                "INSERT INTO devices (name, device_type, substrate, device_number, \
                 tech_description, photo_data, created_at, device_specific_data) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    params.name,
                    params.device_type,
                    params.substrate,
                    params.device_number,
                    params.tech_description,
                    params.photo_data,
                    created_at.to_rfc3339(),
                    data_json,
                ],
            );
            match result {
                Ok(_) => conn.last_insert_rowid(),
                Err(e) if is_unique_violation(&e) => {
                    return Err(ServiceError::AlreadyExists {
                        resource: "Device".to_string(),
                        id: params.device_number.clone(),
                    })
                }
                Err(e) => return Err(e.into()),
            }
        };

        info!(target: "devlab-services", "Created device {} ({})", params.device_number, id);
        self.fetch_device(id)
    }

    async fn update_device(&self, id: i64, patch: DevicePatch) -> ServiceResult<Device> {
        let mut device = self.fetch_device(id)?;

        if let Some(name) = patch.name {
            device.name = name;
        }
        if let Some(device_type) = patch.device_type {
            device.device_type = device_type;
        }
        if let Some(substrate) = patch.substrate {
            device.substrate = substrate;
        }
        if let Some(device_number) = patch.device_number {
            device.device_number = device_number;
        }
        if let Some(tech_description) = patch.tech_description {
            device.tech_description = Some(tech_description);
        }
        if let Some(photo_data) = patch.photo_data {
            device.photo_data = Some(photo_data);
        }
        if let Some(tables) = patch.device_specific_data {
            device.device_specific_data = tables;
        }

        let data_json = serde_json::to_string(&device.device_specific_data)?;

        {
            let conn = self.store.conn();
            let result = conn.execute(
                "UPDATE devices SET name = ?1, device_type = ?2, substrate = ?3, \
                 device_number = ?4, tech_description = ?5, photo_data = ?6, \
                 device_specific_data = ?7 WHERE id = ?8",
                params![
                    device.name,
                    device.device_type,
                    device.substrate,
                    device.device_number,
                    device.tech_description,
                    device.photo_data,
                    data_json,
                    id,
                ],
            );
            if let Err(e) = result {
                if is_unique_violation(&e) {
                    return Err(ServiceError::AlreadyExists {
                        resource: "Device".to_string(),
                        id: device.device_number.clone(),
                    });
                }
                return Err(e.into());
            }
        }

        self.fetch_device(id)
    }

    async fn delete_device(&self, id: i64) -> ServiceResult<()> {
        let conn = self.store.conn();
        let deleted = conn.execute("DELETE FROM devices WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(ServiceError::NotFound {
                resource: "Device".to_string(),
                id: id.to_string(),
            });
        }
        info!(target: "devlab-services", "Deleted device {}", id);
        Ok(())
    }

    async fn candidates_for_comparison(
        &self,
        device_type: &str,
        experiment_type: &str,
    ) -> ServiceResult<Vec<Device>> {
        let devices = {
            let conn = self.store.conn();
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM devices WHERE device_type = ?1 \
                 ORDER BY created_at DESC, id DESC",
                DEVICE_COLUMNS
            ))?;
            let rows = stmt.query_map(params![device_type], DeviceRow::from_row)?;

            let mut devices = Vec::new();
            for row in rows {
                devices.push(row?.decode()?);
            }
            devices
        };

        Ok(devices
            .into_iter()
            .filter(|d| d.table_for(experiment_type).is_some())
            .collect())
    }
}
