// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator session handling: login, logout, whoami, and the session
//! middleware guarding the privileged routes.
//!
//! Sessions are a stateless signed token in an http-only cookie. Logout
//! clears the cookie; the token itself stays valid until natural expiry.

use axum::{
    Extension, Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use brickmov_auth::{SESSION_COOKIE, verify_password};
use brickmov_core::{BrickError, Identity, OperatorPublic};
use brickmov_storage::queries::operators;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::server::GatewayState;

fn session_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

/// An expired empty cookie that overwrites the session on the client.
fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Middleware guarding the privileged routes.
///
/// No cookie is a 401; a cookie that fails verification is a 403 and
/// additionally clears the stale cookie so the browser stops resending it.
/// On success the decoded [`Identity`] is attached to the request.
pub async fn require_session(
    State(state): State<GatewayState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return ApiError(BrickError::Unauthorized).into_response();
    };

    match state.sessions.verify(cookie.value()) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => {
            debug!(error = %err, "rejected session cookie");
            let jar = CookieJar::new().add(clear_session_cookie());
            (jar, ApiError(err).into_response()).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email or username.
    pub identifier: String,
    pub password: String,
}

/// POST /login. Verifies credentials and sets the session cookie.
pub async fn post_login(
    State(state): State<GatewayState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let operator = operators::find_by_identifier(&state.db, body.identifier.trim())
        .await?
        .ok_or(BrickError::InvalidCredentials)?;

    if !verify_password(&body.password, &operator.password_hash)? {
        return Err(BrickError::InvalidCredentials.into());
    }

    let token = state.sessions.mint(operator.id, &operator.email)?;
    let cookie = session_cookie(
        token,
        state.sessions.ttl_seconds(),
        state.settings.secure_cookies,
    );
    info!(operator = operator.id, "operator logged in");

    Ok((
        jar.add(cookie),
        Json(json!({ "success": true, "user": OperatorPublic::from(&operator) })),
    ))
}

/// GET /auth/me. Echoes the identity decoded by the middleware.
pub async fn get_me(Extension(identity): Extension<Identity>) -> Json<serde_json::Value> {
    Json(json!({
        "authenticated": true,
        "user": { "id": identity.operator_id, "email": identity.email },
    }))
}

/// POST /auth/logout. Clears the cookie client-side only.
pub async fn post_logout() -> impl IntoResponse {
    (
        CookieJar::new().add(clear_session_cookie()),
        Json(json!({ "success": true })),
    )
}
