// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

pub mod permissions;

pub use permissions::{Authorizer, AuthzError, Permission};
