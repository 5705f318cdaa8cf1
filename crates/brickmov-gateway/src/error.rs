// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from workspace errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brickmov_core::BrickError;
use serde_json::json;
use tracing::error;

/// Error code sent with quota responses so the frontend can switch the
/// chat widget into its "talk to a human" state.
pub const QUOTA_ERROR_CODE: &str = "PROTOCOL_LIMIT_REACHED";

/// Newtype that gives [`BrickError`] an HTTP rendering.
///
/// Credential failures collapse onto one 401 body so responses do not
/// reveal whether an account exists. Backend failures log the detail and
/// return an opaque 500.
#[derive(Debug)]
pub struct ApiError(pub BrickError);

impl From<BrickError> for ApiError {
    fn from(err: BrickError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            BrickError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            BrickError::NotFound | BrickError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "invalid credentials" }),
            ),
            BrickError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "authentication required" }),
            ),
            BrickError::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "error": message })),
            BrickError::QuotaExceeded { message } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": QUOTA_ERROR_CODE, "message": message }),
            ),
            BrickError::Config(message) => {
                error!(%message, "request failed on server configuration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "server configuration error" }),
                )
            }
            err @ (BrickError::Storage { .. }
            | BrickError::Upstream { .. }
            | BrickError::Internal(_)) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
