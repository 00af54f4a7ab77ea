// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # devlab-observability
//!
//! Unified observability infrastructure for DEVLAB (logging).
//!
//! Provides consistent logging patterns across all DEVLAB crates with
//! per-crate debug flag support, optional JSON file output with rotation,
//! and retention cleanup.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use init::*;

/// Known DEVLAB crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "devlab-api",
    "devlab-services",
    "devlab-config",
];
