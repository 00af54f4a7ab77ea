// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! JWT issuance and verification
//!
//! Access/refresh token pairs signed with HS256. Refresh tokens are only
//! accepted by the refresh endpoint; access tokens only authenticate
//! requests. Expiry is enforced by signature validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::context::AuthError;

/// Token kind carried in the claims, checked on verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by every DEVLAB token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub username: String,
    pub token_type: TokenType,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// An access/refresh pair as returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues and verifies HS256 tokens
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, access_minutes: i64, refresh_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime: Duration::minutes(access_minutes),
            refresh_lifetime: Duration::minutes(refresh_minutes),
        }
    }

    /// Issue a single token of the given type
    pub fn issue(
        &self,
        user_id: i64,
        username: &str,
        token_type: TokenType,
    ) -> Result<String, AuthError> {
        let lifetime = match token_type {
            TokenType::Access => self.access_lifetime,
            TokenType::Refresh => self.refresh_lifetime,
        };
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::new(format!("failed to sign token: {}", e)))
    }

    /// Issue an access/refresh pair
    pub fn issue_pair(&self, user_id: i64, username: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue(user_id, username, TokenType::Access)?,
            refresh: self.issue(user_id, username, TokenType::Refresh)?,
        })
    }

    /// Verify signature, expiry, and token type
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| AuthError::new(format!("invalid token: {}", e)))?;

        if data.claims.token_type != expected {
            return Err(AuthError::new("wrong token type"));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", 60, 24 * 60)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = signer();
        let pair = signer.issue_pair(7, "alice").unwrap();

        let access = signer.verify(&pair.access, TokenType::Access).unwrap();
        assert_eq!(access.sub, 7);
        assert_eq!(access.username, "alice");

        let refresh = signer.verify(&pair.refresh, TokenType::Refresh).unwrap();
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_wrong_token_type_rejected() {
        let signer = signer();
        let pair = signer.issue_pair(7, "alice").unwrap();

        assert!(signer.verify(&pair.refresh, TokenType::Access).is_err());
        assert!(signer.verify(&pair.access, TokenType::Refresh).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = signer().issue_pair(7, "alice").unwrap();
        let other = TokenSigner::new("other-secret", 60, 60);
        assert!(other.verify(&pair.access, TokenType::Access).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = TokenSigner::new("test-secret", -10, 60);
        let token = signer.issue(7, "alice", TokenType::Access).unwrap();
        assert!(signer.verify(&token, TokenType::Access).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(signer().verify("not-a-jwt", TokenType::Access).is_err());
    }
}
