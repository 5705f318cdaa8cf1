// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the brick.mov server.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level brickmov configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrickmovConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Operator session settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Chat proxy quota and persona settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Upload directory settings.
    #[serde(default)]
    pub upload: UploadConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Set the `Secure` flag on cookies. Enable behind TLS in production.
    #[serde(default)]
    pub secure_cookies: bool,

    /// Global request-body cap in bytes. Also the only limit on uploads.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            secure_cookies: false,
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

/// Operator session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Secret used to sign session tokens. Login is refused when unset.
    #[serde(default)]
    pub session_secret: Option<String>,

    /// Session token lifetime in days.
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: None,
            session_ttl_days: default_session_ttl_days(),
        }
    }
}

fn default_session_ttl_days() -> i64 {
    7
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` leaves the chat proxy unconfigured; chat
    /// requests then fail with a configuration error.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier to request.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Chat proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Maximum accepted chat interactions per session window.
    #[serde(default = "default_quota")]
    pub quota: u32,

    /// Session window length in hours. Matches the chat cookie lifetime.
    #[serde(default = "default_window_hours")]
    pub window_hours: u64,

    /// Inline persona prompt string. Overridden by `persona_file` if both set.
    #[serde(default)]
    pub persona: Option<String>,

    /// Path to a markdown file containing the persona prompt.
    /// Takes precedence over `persona` if both are set.
    #[serde(default)]
    pub persona_file: Option<String>,

    /// Canned reply returned once the quota is exhausted.
    #[serde(default = "default_quota_message")]
    pub quota_message: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            quota: default_quota(),
            window_hours: default_window_hours(),
            persona: None,
            persona_file: None,
            quota_message: default_quota_message(),
        }
    }
}

fn default_quota() -> u32 {
    6
}

fn default_window_hours() -> u64 {
    3
}

fn default_quota_message() -> String {
    "Limite de interações do protocolo atingido. Para continuar a conversa, \
     fale com a equipe em contato@brick.mov."
        .to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "brickmov.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Upload directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Directory where uploaded files are persisted and served from.
    #[serde(default = "default_upload_dir")]
    pub dir: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}
