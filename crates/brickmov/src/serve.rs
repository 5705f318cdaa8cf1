// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `brickmov serve` command implementation.
//!
//! Wires the storage, auth, and chat services into the gateway and runs
//! it until a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use brickmov_auth::SessionKeys;
use brickmov_chat::{ChatProxy, QuotaLedger};
use brickmov_config::model::{BrickmovConfig, ChatConfig};
use brickmov_core::BrickError;
use brickmov_gateway::{GatewaySettings, GatewayState, start_server};
use brickmov_gemini::GeminiClient;
use brickmov_storage::Database;
use tracing::{info, warn};

/// Persona used when neither `chat.persona` nor `chat.persona_file` is set.
const DEFAULT_PERSONA: &str = "Você é o PROTOCOLO, a inteligência da brick.mov, \
um estúdio criativo de filmes e transmissões. Responda sempre em português, \
em tom direto e enigmático, e conduza o visitante ao trabalho do estúdio. \
Nunca invente obras que não existem.";

/// Runs the `brickmov serve` command.
pub async fn run_serve(config: BrickmovConfig) -> Result<(), BrickError> {
    init_tracing(&config.server.log_level);
    info!("starting brickmov serve");

    // The secret has no usable default; refuse to serve without one
    // rather than signing sessions with a known value.
    let secret = config
        .auth
        .session_secret
        .as_deref()
        .ok_or_else(|| {
            BrickError::Config(
                "auth.session_secret is required to start the server".to_string(),
            )
        })?;
    let sessions = SessionKeys::new(secret, config.auth.session_ttl_days);

    let db = Arc::new(
        Database::open_with_options(&config.storage.database_path, config.storage.wal_mode)
            .await?,
    );

    let client = match &config.gemini.api_key {
        Some(key) => Some(GeminiClient::new(key, &config.gemini.model)?),
        None => {
            warn!("no Gemini API key configured -- /chat will answer with server errors");
            None
        }
    };

    let persona = resolve_persona(&config.chat)?;
    let chat = ChatProxy::new(
        client,
        QuotaLedger::new(config.chat.quota, config.chat.window_hours),
        persona,
        config.chat.quota_message.clone(),
    );

    let state = GatewayState {
        db: Arc::clone(&db),
        chat: Arc::new(chat),
        sessions: Arc::new(sessions),
        settings: Arc::new(GatewaySettings {
            secure_cookies: config.server.secure_cookies,
            chat_window_hours: config.chat.window_hours,
            upload_dir: PathBuf::from(&config.upload.dir),
        }),
        started_at: std::time::Instant::now(),
    };

    start_server(
        &config.server.host,
        config.server.port,
        config.server.body_limit_bytes,
        state,
    )
    .await?;

    db.close().await?;
    info!("brickmov stopped");
    Ok(())
}

/// Persona precedence: file, then inline config, then the built-in text.
fn resolve_persona(chat: &ChatConfig) -> Result<String, BrickError> {
    if let Some(path) = &chat.persona_file {
        return std::fs::read_to_string(path).map_err(|e| {
            BrickError::Config(format!("failed to read chat.persona_file {path}: {e}"))
        });
    }
    Ok(chat
        .persona
        .clone()
        .unwrap_or_else(|| DEFAULT_PERSONA.to_string()))
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("brickmov={log_level},warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
