// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the brick.mov server.

use thiserror::Error;

/// The primary error type used across the brickmov workspace.
///
/// Every failure is surfaced directly to the caller; the gateway maps
/// variants to HTTP status codes and JSON error bodies. There is no
/// retry or circuit-breaking anywhere in the system.
#[derive(Debug, Error)]
pub enum BrickError {
    /// Server misconfiguration (missing API key, bad TOML, empty secret).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Upstream generative-language API errors (HTTP failure, bad payload).
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No operator account matches the login identifier.
    #[error("account not found")]
    NotFound,

    /// Password did not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session token was presented on a privileged request.
    #[error("unauthorized")]
    Unauthorized,

    /// A session token was presented but is invalid or expired.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The chat session has exhausted its interaction quota.
    ///
    /// Carries the fixed human-readable message directing the user to a
    /// human contact channel.
    #[error("quota exceeded")]
    QuotaExceeded { message: String },

    /// Malformed caller input (missing id, empty contact fields).
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
