// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Service layer DTOs
//!
//! Transport-agnostic parameter and result types for the catalog,
//! dataset, account, and profile services. JSON-backed fields
//! (`device_specific_data`, `csv_files`, dataset `data`, profile
//! `user_configs`) round-trip verbatim through storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn empty_json_array() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

/// One experiment table embedded in a device record.
///
/// `grid_data` is a 2D grid of string cells whose first row is the
/// header row. `csv_files` holds free-form file references and is
/// persisted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentTable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub experiment_type: String,
    #[serde(default)]
    pub grid_data: Vec<Vec<String>>,
    #[serde(default = "empty_json_array")]
    pub csv_files: serde_json::Value,
}

impl ExperimentTable {
    /// Header row of the grid (empty when the grid has no rows)
    pub fn headers(&self) -> &[String] {
        self.grid_data.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Data rows of the grid (everything below the header row)
    pub fn rows(&self) -> &[Vec<String>] {
        if self.grid_data.len() > 1 {
            &self.grid_data[1..]
        } else {
            &[]
        }
    }
}

/// A device record from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub device_type: String,
    pub substrate: String,
    pub device_number: String,
    pub tech_description: Option<String>,
    /// Micrograph stored as an opaque base64 text blob
    pub photo_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub device_specific_data: Vec<ExperimentTable>,
}

impl Device {
    /// Unique experiment types across all embedded tables, sorted and
    /// joined with `/` for list displays.
    pub fn test_types_display(&self) -> String {
        let types: BTreeSet<&str> = self
            .device_specific_data
            .iter()
            .filter(|t| !t.experiment_type.is_empty())
            .map(|t| t.experiment_type.as_str())
            .collect();
        types.into_iter().collect::<Vec<_>>().join("/")
    }

    /// First table with the given experiment type, if any
    pub fn table_for(&self, experiment_type: &str) -> Option<&ExperimentTable> {
        self.device_specific_data
            .iter()
            .find(|t| t.experiment_type == experiment_type)
    }
}

/// Reduced projection used by list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: i64,
    pub name: String,
    pub device_type: String,
    pub substrate: String,
    pub device_number: String,
    pub tech_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub test_types_display: String,
}

impl From<&Device> for DeviceSummary {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
            device_type: device.device_type.clone(),
            substrate: device.substrate.clone(),
            device_number: device.device_number.clone(),
            tech_description: device.tech_description.clone(),
            created_at: device.created_at,
            test_types_display: device.test_types_display(),
        }
    }
}

/// Parameters for creating a device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDevice {
    pub name: String,
    pub device_type: String,
    pub substrate: String,
    pub device_number: String,
    #[serde(default)]
    pub tech_description: Option<String>,
    #[serde(default)]
    pub photo_data: Option<String>,
    #[serde(default)]
    pub device_specific_data: Vec<ExperimentTable>,
}

/// Partial update of a device; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub substrate: Option<String>,
    pub device_number: Option<String>,
    pub tech_description: Option<String>,
    pub photo_data: Option<String>,
    pub device_specific_data: Option<Vec<ExperimentTable>>,
}

/// List query filters for the device catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceQuery {
    /// Exact match on `device_type`
    pub device_type: Option<String>,
    /// Substring search over name / device_number / tech_description
    pub search: Option<String>,
    /// Device must embed a table with this experiment type
    pub experiment_type: Option<String>,
}

/// A named probability curve dataset, `data` persisted verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityDataSet {
    pub id: i64,
    pub name: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a probability dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDataset {
    pub name: String,
    pub data: serde_json::Value,
}

/// Partial update of a probability dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetPatch {
    pub name: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// A stored user account. `password_hash` never leaves the service
/// boundary in API responses.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Per-user LLM API configuration; `user_configs` persisted verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_configs: serde_json::Value,
    pub active_config_id: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user_configs: empty_json_array(),
            active_config_id: "default".to_string(),
        }
    }
}

/// Partial update of a profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub user_configs: Option<serde_json::Value>,
    pub active_config_id: Option<String>,
}

/// Storage health and table counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    pub storage_ok: bool,
    pub device_count: i64,
    pub dataset_count: i64,
    pub user_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_types_display_sorted_unique() {
        let device = Device {
            id: 1,
            name: "GaN HEMT".to_string(),
            device_type: "LNA".to_string(),
            substrate: "SiC".to_string(),
            device_number: "D-001".to_string(),
            tech_description: None,
            photo_data: None,
            created_at: Utc::now(),
            device_specific_data: vec![
                ExperimentTable {
                    name: "run B".to_string(),
                    experiment_type: "pulse".to_string(),
                    grid_data: vec![],
                    csv_files: serde_json::Value::Array(vec![]),
                },
                ExperimentTable {
                    name: "run A".to_string(),
                    experiment_type: "cw".to_string(),
                    grid_data: vec![],
                    csv_files: serde_json::Value::Array(vec![]),
                },
                ExperimentTable {
                    name: "run C".to_string(),
                    experiment_type: "pulse".to_string(),
                    grid_data: vec![],
                    csv_files: serde_json::Value::Array(vec![]),
                },
            ],
        };

        assert_eq!(device.test_types_display(), "cw/pulse");
    }

    #[test]
    fn test_experiment_table_defaults() {
        let table: ExperimentTable = serde_json::from_str("{}").unwrap();
        assert!(table.name.is_empty());
        assert!(table.grid_data.is_empty());
        assert!(table.headers().is_empty());
        assert!(table.rows().is_empty());
        assert_eq!(table.csv_files, serde_json::Value::Array(vec![]));
    }

    #[test]
    fn test_experiment_table_header_and_rows() {
        let table = ExperimentTable {
            name: "t".to_string(),
            experiment_type: "cw".to_string(),
            grid_data: vec![
                vec!["freq".to_string(), "power".to_string()],
                vec!["1.0".to_string(), "2.0".to_string()],
            ],
            csv_files: serde_json::Value::Array(vec![]),
        };
        assert_eq!(table.headers(), ["freq".to_string(), "power".to_string()]);
        assert_eq!(table.rows().len(), 1);
    }
}
