// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Service trait definitions
//!
//! Transport adapters depend on these traits, never on the SQLite
//! implementations directly.

pub mod account_service;
pub mod dataset_service;
pub mod device_service;
pub mod profile_service;
pub mod system_service;

pub use account_service::AccountService;
pub use dataset_service::DatasetService;
pub use device_service::DeviceService;
pub use profile_service::ProfileService;
pub use system_service::SystemService;
