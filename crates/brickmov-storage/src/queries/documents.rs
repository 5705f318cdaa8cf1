// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content document CRUD for the `works` and `transmissions` tables.

use brickmov_core::BrickError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Document, DocumentKind, now_iso8601};

/// List all documents of a kind, newest first. No pagination.
pub async fn list(db: &Database, kind: DocumentKind) -> Result<Vec<Document>, BrickError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, data, created_at FROM {} ORDER BY created_at DESC, id",
                kind.table()
            ))?;
            let rows = stmt.query_map([], |row| {
                Ok(Document {
                    id: row.get(0)?,
                    data: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?;
            let mut documents = Vec::new();
            for row in rows {
                documents.push(row?);
            }
            Ok(documents)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a document, or fully replace its `data` when the id already
/// exists. `created_at` is preserved on replacement so listing order is
/// stable across edits.
pub async fn upsert(
    db: &Database,
    kind: DocumentKind,
    id: &str,
    data: &str,
) -> Result<(), BrickError> {
    let id = id.to_string();
    let data = data.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (id, data, created_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(id) DO UPDATE SET data = excluded.data",
                    kind.table()
                ),
                params![id, data, now_iso8601()],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a document by id. Deleting a non-existent id is not an error.
pub async fn delete(db: &Database, kind: DocumentKind, id: &str) -> Result<(), BrickError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                &format!("DELETE FROM {} WHERE id = ?1", kind.table()),
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
