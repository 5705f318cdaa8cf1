// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for gateway handler tests.

use std::sync::Arc;
use std::time::Duration;

use brickmov_auth::{SessionKeys, hash_password};
use brickmov_chat::{ChatProxy, QuotaLedger};
use brickmov_storage::Database;
use brickmov_storage::queries::operators;
use tempfile::TempDir;

use crate::server::{GatewaySettings, GatewayState};

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";

/// Keeps the temporary directories alive for the duration of a test.
pub struct TestGuards {
    _db_dir: TempDir,
    _upload_dir: TempDir,
}

/// A gateway state over a fresh database, an unconfigured chat proxy,
/// and throwaway directories.
pub async fn test_state() -> (GatewayState, TestGuards) {
    let db_dir = tempfile::tempdir().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();

    let db_path = db_dir.path().join("gateway-test.db");
    let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

    let chat = ChatProxy::new(
        None,
        QuotaLedger::with_window(6, Duration::from_secs(3600)),
        "persona".to_string(),
        "Limite atingido.".to_string(),
    );

    let state = GatewayState {
        db: Arc::new(db),
        chat: Arc::new(chat),
        sessions: Arc::new(SessionKeys::new(TEST_SECRET, 7)),
        settings: Arc::new(GatewaySettings {
            secure_cookies: false,
            chat_window_hours: 3,
            upload_dir: upload_dir.path().to_path_buf(),
        }),
        started_at: std::time::Instant::now(),
    };

    (
        state,
        TestGuards {
            _db_dir: db_dir,
            _upload_dir: upload_dir,
        },
    )
}

/// Replace the chat proxy on a test state.
pub fn with_chat(state: &GatewayState, chat: ChatProxy) -> GatewayState {
    GatewayState {
        chat: Arc::new(chat),
        ..state.clone()
    }
}

pub async fn seed_operator(db: &Database, email: &str, username: &str, password: &str) -> i64 {
    let hash = hash_password(password).unwrap();
    operators::insert_operator(db, email, username, &hash)
        .await
        .unwrap()
}
