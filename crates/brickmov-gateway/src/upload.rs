// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator file uploads.
//!
//! Files land in the upload directory under a generated name and are
//! served back by the static `/uploads` route. The original filename is
//! discarded except for a sanitized extension, so nothing user-supplied
//! ever reaches the filesystem path.

use axum::{
    Json,
    extract::{Multipart, State},
};
use brickmov_core::BrickError;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Lowercased alphanumeric extension of at most 8 chars, or nothing.
fn sanitized_extension(original: &str) -> Option<String> {
    let ext = std::path::Path::new(original).extension()?.to_str()?;
    let ext: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(8)
        .collect();
    if ext.is_empty() { None } else { Some(ext) }
}

fn stored_file_name(original: &str) -> String {
    let base = uuid::Uuid::new_v4().simple().to_string();
    match sanitized_extension(original) {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

/// POST /upload. Stores the first file field of the multipart body.
pub async fn post_upload(
    State(state): State<GatewayState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BrickError::Validation(format!("malformed multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| BrickError::Validation(format!("failed to read upload: {e}")))?;

        let name = stored_file_name(&file_name);
        tokio::fs::create_dir_all(&state.settings.upload_dir)
            .await
            .map_err(|e| BrickError::Internal(format!("failed to create upload dir: {e}")))?;
        tokio::fs::write(state.settings.upload_dir.join(&name), &bytes)
            .await
            .map_err(|e| BrickError::Internal(format!("failed to store upload: {e}")))?;

        info!(file = %name, size = bytes.len(), "upload stored");
        return Ok(Json(json!({ "url": format!("/uploads/{name}") })));
    }

    Err(BrickError::Validation("multipart body contains no file field".to_string()).into())
}
