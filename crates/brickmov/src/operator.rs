// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `brickmov operator add` command implementation.
//!
//! Operator accounts are created from the terminal only; the server has
//! no registration endpoint.

use brickmov_auth::hash_password;
use brickmov_config::model::BrickmovConfig;
use brickmov_core::BrickError;
use brickmov_storage::Database;
use brickmov_storage::queries::operators;

/// Runs the `brickmov operator add` command.
pub async fn run_operator_add(
    config: BrickmovConfig,
    email: &str,
    username: &str,
) -> Result<(), BrickError> {
    let email = email.trim();
    let username = username.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(BrickError::Validation("a valid email is required".to_string()));
    }
    if username.is_empty() {
        return Err(BrickError::Validation("username must not be empty".to_string()));
    }

    let password = prompt("Password: ")?;
    let confirm = prompt("Confirm password: ")?;
    if password != confirm {
        return Err(BrickError::Validation("passwords do not match".to_string()));
    }
    if password.len() < 8 {
        return Err(BrickError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let hash = hash_password(&password)?;

    let db =
        Database::open_with_options(&config.storage.database_path, config.storage.wal_mode).await?;
    let id = operators::insert_operator(&db, email, username, &hash).await?;
    db.close().await?;

    println!("operator {username} created (id {id})");
    Ok(())
}

fn prompt(label: &str) -> Result<String, BrickError> {
    rpassword::prompt_password(label)
        .map_err(|e| BrickError::Internal(format!("failed to read password: {e}")))
}
