// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact-form lead inserts. Append-only; nothing in the server reads
//! these rows back.

use brickmov_core::BrickError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Lead, now_iso8601};

/// Insert a new lead with a generated id. Returns the stored record.
pub async fn insert_lead(db: &Database, email: &str, message: &str) -> Result<Lead, BrickError> {
    let lead = Lead {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.to_string(),
        message: message.to_string(),
        created_at: now_iso8601(),
    };
    let stored = lead.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO leads (id, email, message, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![lead.id, lead.email, lead.message, lead.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(stored)
}

/// Count stored leads. Used by tests and `operator` tooling only.
pub async fn count_leads(db: &Database) -> Result<i64, BrickError> {
    db.connection()
        .call(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM leads", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
