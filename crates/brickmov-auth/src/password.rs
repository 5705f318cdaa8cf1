// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id password hashing and verification for operator accounts.
//!
//! Hashes use the PHC string format so parameters and salt travel with the
//! stored value.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use brickmov_core::BrickError;

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, BrickError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BrickError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored PHC hash string.
///
/// Returns `Ok(false)` on mismatch; errors are reserved for malformed
/// stored hashes.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, BrickError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| BrickError::Internal(format!("stored password hash is malformed: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(BrickError::Internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn same_password_produces_distinct_hashes() {
        let h1 = hash_password("repeat").unwrap();
        let h2 = hash_password("repeat").unwrap();
        assert_ne!(h1, h2, "salts must differ");
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
