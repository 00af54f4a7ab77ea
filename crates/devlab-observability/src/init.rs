// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for DEVLAB
//!
//! Provides console logging plus optional JSON file logging with rotation,
//! timestamped run folders, and configurable retention.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Logging initialization result
///
/// Holds the non-blocking writer guards; dropping it flushes and closes
/// the log files.
pub struct LoggingGuard {
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Get the log directory path for this run, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Initialize logging with console output and optional file output
///
/// When `log_dir` is given, creates a timestamped folder structure:
/// ```text
/// ./logs/
///   └── run_20250101_120000/
///       └── devlab.log
/// ```
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `log_dir` - Base directory for file logs; `None` disables file logging
/// * `retention_days` - Keep log runs for N days (default: 30)
/// * `retention_runs` - Keep N most recent runs (default: 10)
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    log_dir: Option<PathBuf>,
    retention_days: Option<u64>,
    retention_runs: Option<usize>,
) -> Result<LoggingGuard> {
    // Build filter string from debug flags
    let filter = debug_flags.to_filter_string();
    let env_filter = EnvFilter::new(&filter);

    let mut layers = Vec::new();
    let mut file_guards = Vec::new();
    let mut run_folder = None;

    // Console layer (human-readable)
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter)
        .boxed();
    layers.push(console_layer);

    if let Some(base_log_dir) = log_dir {
        // Create timestamped run folder
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let folder = base_log_dir.join(format!("run_{}", timestamp));
        std::fs::create_dir_all(&folder)
            .with_context(|| format!("Failed to create log directory: {}", folder.display()))?;

        // Clean up old logs based on retention policy
        cleanup_old_logs(&base_log_dir, retention_days, retention_runs)?;

        // Combined JSON log file with daily rotation
        let file_appender = rolling::daily(&folder, "devlab.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        file_guards.push(guard);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(EnvFilter::new(debug_flags.to_filter_string()))
            .boxed();
        layers.push(file_layer);

        run_folder = Some(folder);
    }

    Registry::default().with(layers).init();

    Ok(LoggingGuard {
        _file_guards: file_guards,
        log_dir: run_folder,
    })
}

/// Clean up old log directories based on retention policy
fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: Option<u64>,
    retention_runs: Option<usize>,
) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let retention_days = retention_days.unwrap_or(30);
    let retention_runs = retention_runs.unwrap_or(10);
    let cutoff_date = Utc::now() - chrono::Duration::days(retention_days as i64);

    // Collect all run directories
    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();

    for entry in std::fs::read_dir(base_log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            if let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) {
                // Parse timestamp from folder name: run_20250101_120000
                if let Some(timestamp_str) = dir_name.strip_prefix("run_") {
                    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp_str, "%Y%m%d_%H%M%S") {
                        runs.push((path, dt.and_utc()));
                    }
                }
            }
        }
    }

    // Sort by date (oldest first)
    runs.sort_by_key(|(_, dt)| *dt);

    // Remove runs older than retention_days
    let mut removed_count = 0;
    for (path, dt) in &runs {
        if *dt < cutoff_date {
            if let Err(e) = std::fs::remove_dir_all(path) {
                eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                );
            } else {
                removed_count += 1;
            }
        }
    }

    // Keep only the most recent N runs (after removing old ones)
    if runs.len() - removed_count > retention_runs {
        let to_remove = runs.len() - removed_count - retention_runs;
        for (path, dt) in runs.iter().take(to_remove) {
            if *dt >= cutoff_date && path.exists() {
                if let Err(e) = std::fs::remove_dir_all(path) {
                    eprintln!(
                        "Warning: Failed to remove old log directory {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    Ok(())
}

/// Initialize console-only logging with default settings
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, None, None, None)
}
