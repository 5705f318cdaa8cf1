// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and a
//! sufficiently long session secret.

use crate::diagnostic::ConfigError;
use crate::model::BrickmovConfig;

/// Minimum acceptable length for `auth.session_secret`.
const MIN_SECRET_LEN: usize = 32;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BrickmovConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host is not empty and plausible.
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.body_limit_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "server.body_limit_bytes must be greater than zero".to_string(),
        });
    }

    // Validate session secret length when set. An unset secret is allowed
    // here; the serve command refuses to start without one.
    if let Some(secret) = &config.auth.session_secret
        && secret.len() < MIN_SECRET_LEN
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.session_secret must be at least {MIN_SECRET_LEN} characters, got {}",
                secret.len()
            ),
        });
    }

    if config.auth.session_ttl_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.session_ttl_days must be at least 1, got {}",
                config.auth.session_ttl_days
            ),
        });
    }

    if config.chat.quota < 1 {
        errors.push(ConfigError::Validation {
            message: format!("chat.quota must be at least 1, got {}", config.chat.quota),
        });
    }

    if config.chat.window_hours < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "chat.window_hours must be at least 1, got {}",
                config.chat.window_hours
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.upload.dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "upload.dir must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = BrickmovConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = BrickmovConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn short_session_secret_fails_validation() {
        let mut config = BrickmovConfig::default();
        config.auth.session_secret = Some("too-short".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("session_secret"))
        ));
    }

    #[test]
    fn unset_session_secret_is_allowed() {
        let config = BrickmovConfig::default();
        assert!(config.auth.session_secret.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_quota_fails_validation() {
        let mut config = BrickmovConfig::default();
        config.chat.quota = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("chat.quota"))
        ));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = BrickmovConfig::default();
        config.chat.quota = 0;
        config.storage.database_path = " ".to_string();
        config.upload.dir = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = BrickmovConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.auth.session_secret =
            Some("0123456789abcdef0123456789abcdef".to_string());
        config.storage.database_path = "/var/lib/brickmov/brickmov.db".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
