// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator account lookups.
//!
//! The credential table is read-only to the server; rows are inserted only
//! by the `brickmov operator add` CLI command.

use brickmov_core::BrickError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Operator, now_iso8601};

/// Find one operator whose email OR username equals `identifier`.
///
/// When the identifier could match different rows by email and by username,
/// the email match wins, making the lookup deterministic.
pub async fn find_by_identifier(
    db: &Database,
    identifier: &str,
) -> Result<Option<Operator>, BrickError> {
    let identifier = identifier.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, username, password_hash, created_at
                 FROM operators
                 WHERE email = ?1 OR username = ?1
                 ORDER BY (email = ?1) DESC
                 LIMIT 1",
            )?;
            let result = stmt.query_row(params![identifier], |row| {
                Ok(Operator {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    username: row.get(2)?,
                    password_hash: row.get(3)?,
                    created_at: row.get(4)?,
                })
            });
            match result {
                Ok(operator) => Ok(Some(operator)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a new operator account. Returns the generated row id.
pub async fn insert_operator(
    db: &Database,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<i64, BrickError> {
    let email = email.to_string();
    let username = username.to_string();
    let password_hash = password_hash.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO operators (email, username, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![email, username, password_hash, now_iso8601()],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
