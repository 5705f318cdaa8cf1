// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator authentication primitives for the brick.mov server.
//!
//! Password hashing (Argon2id) and stateless HS256 session tokens. The
//! HTTP side of authentication (cookies, middleware) lives in the gateway
//! crate; this crate is pure crypto.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{SessionClaims, SessionKeys};

/// Name of the operator session cookie.
pub const SESSION_COOKIE: &str = "brick_session";
