// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The public chat endpoint.
//!
//! Visitors are tracked by a random http-only cookie minted on their
//! first chat call. The cookie is NOT refreshed on later calls, so its
//! lifetime tracks the quota window it was minted for.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use brickmov_chat::CHAT_COOKIE;
use brickmov_core::{BrickError, ChatTurn};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::server::{GatewaySettings, GatewayState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, resent by the client on every call. The server keeps
    /// no conversation state.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

fn is_valid_session_id(value: &str) -> bool {
    value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Returns the visitor session id, minting a fresh cookie when the
/// request carries none (or a malformed one).
fn visitor_session(jar: CookieJar, settings: &GatewaySettings) -> (String, CookieJar) {
    if let Some(cookie) = jar.get(CHAT_COOKIE)
        && is_valid_session_id(cookie.value())
    {
        return (cookie.value().to_string(), jar);
    }

    let id = hex::encode(rand::random::<[u8; 16]>());
    let cookie = Cookie::build((CHAT_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies)
        .max_age(time::Duration::hours(settings.chat_window_hours as i64))
        .build();
    (id, jar.add(cookie))
}

/// POST /chat.
///
/// The minted cookie (when there is one) rides on every outcome,
/// including the 429 quota response, so the visitor keeps the same
/// identity across the whole window.
pub async fn post_chat(
    State(state): State<GatewayState>,
    jar: CookieJar,
    Json(body): Json<ChatRequest>,
) -> Response {
    let message = body.message.trim();
    if message.is_empty() {
        return ApiError(BrickError::Validation(
            "message must not be empty".to_string(),
        ))
        .into_response();
    }

    let (session_id, jar) = visitor_session(jar, &state.settings);

    match state.chat.handle(&session_id, &body.history, message).await {
        Ok(reply) => (
            jar,
            Json(json!({ "response": reply.text, "remaining": reply.remaining })),
        )
            .into_response(),
        Err(err) => (jar, ApiError(err).into_response()).into_response(),
    }
}
