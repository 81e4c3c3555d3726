//! Document model shared by every store backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Identifier assigned to a document on insert.
///
/// UUIDv7, so ids sort by creation time and double as an insertion-order
/// tiebreaker in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents and write outcomes
// ─────────────────────────────────────────────────────────────────────────────

/// A stored document: an id plus its JSON body.
///
/// Bodies are stored exactly as the client sent them; the store assigns the
/// id and never reaches into the body except for field queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub body: JsonValue,
}

impl Document {
    /// Wire shape for a document: the body with the id folded in.
    ///
    /// A stored `id` field in the body, if any, is shadowed by the store's.
    pub fn to_json(&self) -> JsonValue {
        match &self.body {
            JsonValue::Object(fields) => {
                let mut out = fields.clone();
                out.insert("id".to_string(), JsonValue::String(self.id.to_string()));
                JsonValue::Object(out)
            }
            other => serde_json::json!({ "id": self.id.to_string(), "value": other }),
        }
    }
}

/// Result of a field update, reported to clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    /// Documents the update targeted.
    pub matched: u64,
    /// Documents whose body actually changed.
    pub modified: u64,
}

/// Result of a delete, reported to clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_round_trips_through_display() {
        let id = DocumentId::new();
        let parsed: DocumentId = id.to_string().parse().expect("display form must parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn document_ids_are_time_ordered() {
        let first = DocumentId::new();
        let second = DocumentId::new();
        assert!(first <= second);
    }

    #[test]
    fn to_json_folds_id_into_object_bodies() {
        let doc = Document {
            id: DocumentId::new(),
            body: serde_json::json!({ "email": "u@example.com", "name": "U" }),
        };
        let json = doc.to_json();
        assert_eq!(json["id"], serde_json::json!(doc.id.to_string()));
        assert_eq!(json["email"], serde_json::json!("u@example.com"));
        assert_eq!(json["name"], serde_json::json!("U"));
    }

    #[test]
    fn to_json_wraps_non_object_bodies() {
        let doc = Document {
            id: DocumentId::new(),
            body: serde_json::json!(42),
        };
        let json = doc.to_json();
        assert_eq!(json["id"], serde_json::json!(doc.id.to_string()));
        assert_eq!(json["value"], serde_json::json!(42));
    }
}
