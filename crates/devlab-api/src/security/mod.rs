// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Request authentication and authorization

pub mod auth;
pub mod authz;

pub use auth::context::{AuthContext, AuthError, AuthMethod};
pub use auth::password::{hash_password, verify_password};
pub use auth::tokens::{Claims, TokenPair, TokenSigner, TokenType};
pub use authz::{Authorizer, Permission};
