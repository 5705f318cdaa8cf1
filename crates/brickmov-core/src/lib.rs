// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the brick.mov server.
//!
//! Provides the error taxonomy and domain types shared by every crate
//! in the workspace.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BrickError;
pub use types::{ChatTurn, Document, DocumentKind, Identity, Lead, Operator, OperatorPublic};
