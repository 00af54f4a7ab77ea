// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Type aliases shared by endpoint modules
//!
//! Endpoints import extractors from here rather than from axum directly,
//! keeping the handler signatures uniform across modules.

pub use axum::extract::{Path, Query, State};
pub use axum::response::Json;

pub use crate::transports::http::server::ApiState;
