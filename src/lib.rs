//! # DEVLAB - Device Test-Data Catalog and RF Assessment Backend
//!
//! DEVLAB is a REST backend for managing a catalog of physical test
//! devices (semiconductor/RF components), their experimental datasets,
//! engineering calculators (electromagnetic damage assessment, link
//! budget, system failure probability), and per-user LLM API
//! configuration.
//!
//! The crates are layered the same way the server binary wires them:
//!
//! - [`config`] loads `devlab_configuration.toml` with env/CLI overrides
//! - [`observability`] initializes tracing (console + optional files)
//! - [`services`] owns the SQLite store, service traits, and calculators
//! - [`api`] exposes the axum HTTP router over the service layer
//!
//! ## Starting a server
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use devlab::services::{DeviceServiceImpl, Store};
//!
//! let store = Arc::new(Store::open_in_memory().unwrap());
//! let devices = DeviceServiceImpl::new(store);
//! // ... build the remaining services, an ApiState, and serve
//! // devlab::api::create_http_server(state) with axum.
//! ```
//!
//! See `tools/devlab_server.rs` for the complete wiring.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use devlab_api as api;
pub use devlab_config as config;
pub use devlab_observability as observability;
pub use devlab_services as services;
