// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the brickmov workspace.

use serde::{Deserialize, Serialize};

/// An operator account as stored in the credential table.
///
/// Created out-of-band via `brickmov operator add`; the server only
/// ever reads these rows.
#[derive(Debug, Clone)]
pub struct Operator {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Argon2id PHC-format hash string.
    pub password_hash: String,
    pub created_at: String,
}

/// The operator record as returned to clients, with the hash stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorPublic {
    pub id: i64,
    pub email: String,
    pub username: String,
}

impl From<&Operator> for OperatorPublic {
    fn from(op: &Operator) -> Self {
        Self {
            id: op.id,
            email: op.email.clone(),
            username: op.username.clone(),
        }
    }
}

/// The identity decoded from a valid session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub operator_id: i64,
    pub email: String,
}

/// The two content document kinds, each backed by its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Work,
    Transmission,
}

impl DocumentKind {
    /// Backing table name. Kinds are a closed enum, so interpolating
    /// this into SQL is safe.
    pub fn table(self) -> &'static str {
        match self {
            Self::Work => "works",
            Self::Transmission => "transmissions",
        }
    }
}

/// An opaque JSON content record keyed by a caller-chosen id.
///
/// `data` is the verbatim JSON payload; the server enforces no shape
/// beyond "valid JSON with a string id".
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: String,
    pub created_at: String,
}

/// A contact-form submission. Append-only.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

/// One prior turn of a chat conversation as supplied by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_public_strips_hash() {
        let op = Operator {
            id: 7,
            email: "admin@brick.mov".into(),
            username: "admin".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        let public = OperatorPublic::from(&op);
        let json = serde_json::to_string(&public).unwrap();
        assert!(json.contains("admin@brick.mov"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn document_kind_tables() {
        assert_eq!(DocumentKind::Work.table(), "works");
        assert_eq!(DocumentKind::Transmission.table(), "transmissions");
    }

    #[test]
    fn chat_turn_roundtrips() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"role":"user","content":"oi"}"#).unwrap();
        assert_eq!(turn.role, "user");
        assert_eq!(turn.content, "oi");
    }
}
