// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HS256 session token mint and verification.
//!
//! Tokens are stateless: once minted they remain valid until natural
//! expiry. Logout only clears the cookie on the client side; there is no
//! server-side revocation.

use brickmov_core::{BrickError, Identity};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried inside a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Operator row id.
    pub sub: i64,
    pub email: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Signing and verification keys derived from the configured secret.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl SessionKeys {
    /// Build keys from the server secret with the given token lifetime.
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: chrono::Duration::days(ttl_days),
        }
    }

    /// Token lifetime in seconds; also used for the cookie max-age.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Mint a signed token for an authenticated operator.
    pub fn mint(&self, operator_id: i64, email: &str) -> Result<String, BrickError> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: operator_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| BrickError::Internal(format!("failed to sign session token: {e}")))
    }

    /// Verify a token's signature and expiry, returning the identity.
    pub fn verify(&self, token: &str) -> Result<Identity, BrickError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    BrickError::Forbidden("session expired".to_string())
                }
                _ => BrickError::Forbidden("invalid session token".to_string()),
            })?;
        Ok(Identity {
            operator_id: data.claims.sub,
            email: data.claims.email,
        })
    }
}
