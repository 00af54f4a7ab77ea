// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Password hashing
//!
//! Argon2id with per-password salts. The service layer only ever stores
//! the encoded hash string produced here.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::context::AuthError;

/// Hash a plaintext password for storage
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::new(format!("failed to hash password: {}", e)))
}

/// Verify a plaintext password against a stored hash
///
/// A malformed stored hash is an error; a mismatching password is `false`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::new(format!("malformed password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
