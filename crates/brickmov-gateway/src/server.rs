// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. Public routes serve the
//! site content and the chat proxy; privileged routes sit behind the
//! operator session middleware.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use brickmov_auth::SessionKeys;
use brickmov_chat::ChatProxy;
use brickmov_core::BrickError;
use brickmov_storage::Database;
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{auth, chat, contact, content, upload};

/// Static gateway settings carried alongside the shared services.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Mark cookies `Secure`. Off for plain-HTTP local development.
    pub secure_cookies: bool,
    /// Visitor chat cookie lifetime, matching the quota window.
    pub chat_window_hours: u64,
    /// Directory uploads are written to and served from.
    pub upload_dir: PathBuf,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub db: Arc<Database>,
    pub chat: Arc<ChatProxy>,
    pub sessions: Arc<SessionKeys>,
    pub settings: Arc<GatewaySettings>,
    /// Process start time for uptime reporting.
    pub started_at: std::time::Instant,
}

async fn get_health(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}

/// Build the full route tree for the given state.
///
/// Split out from [`start_server`] so tests can drive the router with
/// `tower::ServiceExt::oneshot` instead of binding a socket.
pub fn router(state: GatewayState, body_limit_bytes: usize) -> Router {
    let public_routes = Router::new()
        .route("/health", get(get_health))
        .route("/works", get(content::list_works))
        .route("/transmissions", get(content::list_transmissions))
        .route("/contact", post(contact::post_contact))
        .route("/chat", post(chat::post_chat))
        .route("/login", post(auth::post_login))
        .route("/auth/logout", post(auth::post_logout))
        .with_state(state.clone());

    // Privileged content-management routes behind the session middleware.
    let api_routes = Router::new()
        .route("/auth/me", get(auth::get_me))
        .route("/works", post(content::post_work))
        .route("/works/{id}", delete(content::delete_work))
        .route("/transmissions", post(content::post_transmission))
        .route("/transmissions/{id}", delete(content::delete_transmission))
        .route("/upload", post(upload::post_upload))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .nest_service(
            "/uploads",
            ServeDir::new(state.settings.upload_dir.clone()),
        )
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn start_server(
    host: &str,
    port: u16,
    body_limit_bytes: usize,
    state: GatewayState,
) -> Result<(), BrickError> {
    let app = router(state, body_limit_bytes);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BrickError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BrickError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
