// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// DEVLAB REST API Layer
//
// This crate provides the HTTP (Axum) API layer for the device catalog,
// probability dataset store, calculators, comparison filter, and user
// profiles, on top of the devlab-services service layer.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod endpoints;
pub mod middleware;
pub mod openapi;
pub mod security;
pub mod transports;

// Re-export commonly used types
pub use common::{ApiError, ApiResponse, EmptyResponse};
pub use security::{AuthContext, Permission};
pub use transports::http::server::{create_http_server, ApiState};
