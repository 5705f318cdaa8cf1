// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./brickmov.toml` > `~/.config/brickmov/brickmov.toml`
//! > `/etc/brickmov/brickmov.toml` with environment variable overrides via the
//! `BRICKMOV_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BrickmovConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/brickmov/brickmov.toml` (system-wide)
/// 3. `~/.config/brickmov/brickmov.toml` (user XDG config)
/// 4. `./brickmov.toml` (local directory)
/// 5. `BRICKMOV_*` environment variables
pub fn load_config() -> Result<BrickmovConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<BrickmovConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BrickmovConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BrickmovConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BrickmovConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BrickmovConfig::default()))
        .merge(Toml::file("/etc/brickmov/brickmov.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("brickmov/brickmov.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("brickmov.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `BRICKMOV_AUTH_SESSION_SECRET` must map
/// to `auth.session_secret`, not `auth.session.secret`.
fn env_provider() -> Env {
    Env::prefixed("BRICKMOV_").map(|key| {
        // `key` keeps the env var's original casing with the prefix stripped,
        // so normalize before matching section names.
        // Example: BRICKMOV_GEMINI_API_KEY -> "GEMINI_API_KEY" -> "gemini.api_key"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("chat_", "chat.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("upload_", "upload.", 1);
        mapped.into()
    })
}
