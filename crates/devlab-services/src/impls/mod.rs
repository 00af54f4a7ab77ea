// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! SQLite-backed service implementations

pub mod account_service_impl;
pub mod dataset_service_impl;
pub mod device_service_impl;
pub mod profile_service_impl;
pub mod system_service_impl;

pub use account_service_impl::AccountServiceImpl;
pub use dataset_service_impl::DatasetServiceImpl;
pub use device_service_impl::DeviceServiceImpl;
pub use profile_service_impl::ProfileServiceImpl;
pub use system_service_impl::SystemServiceImpl;
