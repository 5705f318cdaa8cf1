// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `brickmov-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within the
//! storage crate.

pub use brickmov_core::types::{Document, DocumentKind, Lead, Operator};

/// Current UTC time in the ISO 8601 millisecond format stored in the
/// `created_at` columns.
pub fn now_iso8601() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_iso8601_has_expected_shape() {
        let now = now_iso8601();
        assert!(now.ends_with('Z'));
        assert_eq!(now.len(), "2026-01-01T00:00:00.000Z".len());
    }
}
