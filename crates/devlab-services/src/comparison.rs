// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device comparison filter
//!
//! Scans the embedded experiment grids of candidate devices and keeps
//! the devices whose grid satisfies every requested parameter range.
//! Also reports the union of header names across all candidates so the
//! UI can offer filterable parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::dtos::{Device, ExperimentTable};
use crate::types::errors::{ServiceError, ServiceResult};

/// One requested parameter range. Blank or missing bounds are open
/// (treated as ±infinity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamFilter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

/// A device that passed the filter, carrying only the matching table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonMatch {
    pub id: i64,
    pub name: String,
    pub device_number: String,
    pub table: ExperimentTable,
}

/// Filter outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub matches: Vec<ComparisonMatch>,
    /// Sorted union of header names across all candidates, independent
    /// of filter pass/fail
    pub available_params: Vec<String>,
}

/// A bound that is present but does not parse as a number is a client
/// error; a missing or blank bound is open.
fn parse_bound(raw: Option<&str>, open_value: f64) -> ServiceResult<f64> {
    match raw {
        Some(text) if !text.trim().is_empty() => {
            text.trim().parse::<f64>().map_err(|_| {
                ServiceError::InvalidInput(format!("'{}' is not a number", text))
            })
        }
        _ => Ok(open_value),
    }
}

/// Resolved numeric range for one filter
struct ResolvedFilter<'a> {
    name: &'a str,
    min: f64,
    max: f64,
}

/// Does any data row hold a parsable number inside the range at the
/// given column? Unparsable and short rows are skipped, not failures.
fn any_row_in_range(table: &ExperimentTable, column: usize, min: f64, max: f64) -> bool {
    table.rows().iter().any(|row| {
        row.get(column)
            .and_then(|cell| cell.trim().parse::<f64>().ok())
            .map(|value| min <= value && value <= max)
            .unwrap_or(false)
    })
}

/// Apply the comparison filter over candidate devices.
///
/// Candidates are expected to embed a table of `experiment_type`; the
/// first such table per device is scanned. Devices pass when every
/// filter is satisfied by at least one row; with no effective filters,
/// all candidates pass unfiltered.
pub fn compare_devices(
    devices: &[Device],
    experiment_type: &str,
    filters: &[ParamFilter],
) -> ServiceResult<ComparisonOutcome> {
    // Rows the user added without naming a parameter are dropped
    let effective: Vec<&ParamFilter> = filters.iter().filter(|f| !f.name.is_empty()).collect();

    let resolved: Vec<ResolvedFilter<'_>> = effective
        .iter()
        .map(|f| {
            Ok(ResolvedFilter {
                name: f.name.as_str(),
                min: parse_bound(f.min.as_deref(), f64::NEG_INFINITY)?,
                max: parse_bound(f.max.as_deref(), f64::INFINITY)?,
            })
        })
        .collect::<ServiceResult<_>>()?;

    let mut matches = Vec::new();
    let mut available_params: BTreeSet<String> = BTreeSet::new();

    for device in devices {
        let Some(table) = device.table_for(experiment_type) else {
            continue;
        };

        let headers = table.headers();
        for header in headers {
            available_params.insert(header.clone());
        }

        let passes = resolved.iter().all(|filter| {
            headers
                .iter()
                .position(|h| h == filter.name)
                .map(|column| any_row_in_range(table, column, filter.min, filter.max))
                .unwrap_or(false)
        });

        if passes {
            matches.push(ComparisonMatch {
                id: device.id,
                name: device.name.clone(),
                device_number: device.device_number.clone(),
                table: table.clone(),
            });
        }
    }

    Ok(ComparisonOutcome {
        matches,
        available_params: available_params.into_iter().collect(),
    })
}
