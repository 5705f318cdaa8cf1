// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The public contact form. Submissions become append-only lead rows;
//! no notification is sent anywhere.

use axum::{Json, extract::State};
use brickmov_core::BrickError;
use brickmov_storage::queries::leads;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub email: String,
    pub message: String,
}

/// POST /contact.
pub async fn post_contact(
    State(state): State<GatewayState>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = body.email.trim();
    let message = body.message.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(BrickError::Validation("a valid email is required".to_string()).into());
    }
    if message.is_empty() {
        return Err(BrickError::Validation("message must not be empty".to_string()).into());
    }

    let lead = leads::insert_lead(&state.db, email, message).await?;
    info!(lead = %lead.id, "contact lead stored");
    Ok(Json(json!({ "success": true })))
}
