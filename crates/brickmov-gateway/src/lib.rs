// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public HTTP gateway for the brick.mov site.
//!
//! One axum router serves the whole surface: public content listings,
//! the contact form, the quota-gated chat proxy, and the cookie-session
//! operator API used by the admin frontend.

pub mod auth;
pub mod chat;
pub mod contact;
pub mod content;
pub mod error;
pub mod server;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiError;
pub use server::{GatewaySettings, GatewayState, router, start_server};
