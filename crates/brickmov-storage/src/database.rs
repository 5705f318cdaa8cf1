// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use brickmov_core::BrickError;
use tracing::debug;

/// Handle to the single tokio-rusqlite connection.
///
/// Opening runs PRAGMA setup and embedded migrations; closing checkpoints
/// the WAL so the main database file is complete on disk.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, apply PRAGMAs and
    /// run pending migrations.
    pub async fn open(path: &str) -> Result<Self, BrickError> {
        Self::open_with_options(path, true).await
    }

    /// Open with explicit control over WAL mode.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, BrickError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| BrickError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode=WAL;")?;
            }
            conn.execute_batch(
                "PRAGMA synchronous=NORMAL;
                 PRAGMA foreign_keys=ON;
                 PRAGMA busy_timeout=5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e| match e {
                tokio_rusqlite::Error::Error(inner) => inner,
                other => BrickError::Storage {
                    source: Box::new(other),
                },
            })?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL. Called before shutdown.
    pub async fn close(&self) -> Result<(), BrickError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the workspace storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> BrickError {
    BrickError::Storage {
        source: Box::new(e),
    }
}
