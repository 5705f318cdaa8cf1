// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content document endpoints for the `works` and `transmissions`
//! collections.
//!
//! Documents are opaque JSON: the only shape the server enforces is a
//! non-empty string `id`. Everything else is the frontend's contract
//! with itself.

use axum::{
    Json,
    extract::{Path, State},
};
use brickmov_core::{BrickError, DocumentKind};
use brickmov_storage::queries::documents;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::server::GatewayState;

async fn list(state: &GatewayState, kind: DocumentKind) -> Result<Json<Vec<Value>>, ApiError> {
    let docs = documents::list(&state.db, kind).await?;
    let mut items = Vec::with_capacity(docs.len());
    for doc in docs {
        let value: Value = serde_json::from_str(&doc.data).map_err(|e| {
            BrickError::Internal(format!("stored document {} is not valid JSON: {e}", doc.id))
        })?;
        items.push(value);
    }
    Ok(Json(items))
}

async fn upsert(
    state: &GatewayState,
    kind: DocumentKind,
    body: Value,
) -> Result<Json<Value>, ApiError> {
    let id = body
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            BrickError::Validation("document requires a non-empty string \"id\"".to_string())
        })?
        .to_string();

    let data = serde_json::to_string(&body)
        .map_err(|e| BrickError::Internal(format!("failed to serialize document: {e}")))?;
    documents::upsert(&state.db, kind, &id, &data).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn remove(
    state: &GatewayState,
    kind: DocumentKind,
    id: String,
) -> Result<Json<Value>, ApiError> {
    documents::delete(&state.db, kind, &id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn list_works(State(state): State<GatewayState>) -> Result<Json<Vec<Value>>, ApiError> {
    list(&state, DocumentKind::Work).await
}

pub async fn list_transmissions(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    list(&state, DocumentKind::Transmission).await
}

pub async fn post_work(
    State(state): State<GatewayState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    upsert(&state, DocumentKind::Work, body).await
}

pub async fn post_transmission(
    State(state): State<GatewayState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    upsert(&state, DocumentKind::Transmission, body).await
}

pub async fn delete_work(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    remove(&state, DocumentKind::Work, id).await
}

pub async fn delete_transmission(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    remove(&state, DocumentKind::Transmission, id).await
}
