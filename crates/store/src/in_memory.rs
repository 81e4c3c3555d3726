//! In-memory store. Intended for tests and development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::document::{DeleteOutcome, Document, DocumentId, UpdateOutcome};
use crate::error::StoreError;
use crate::store::DocumentStore;

/// Process-local [`DocumentStore`] backed by a `RwLock`ed map.
///
/// Collections are plain vectors in insertion order, so listing order falls
/// out for free. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, body: JsonValue) -> Result<Document, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let document = Document {
            id: DocumentId::new(),
            body,
        };
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let matches = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.body.get(field).and_then(JsonValue::as_str) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matches)
    }

    async fn set_field(
        &self,
        collection: &str,
        id: DocumentId,
        field: &str,
        value: JsonValue,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            });
        };
        let Some(doc) = docs.iter_mut().find(|doc| doc.id == id) else {
            return Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            });
        };

        // Non-object bodies have no fields to set; match without modifying.
        let Some(fields) = doc.body.as_object_mut() else {
            return Ok(UpdateOutcome {
                matched: 1,
                modified: 0,
            });
        };
        let previous = fields.insert(field.to_string(), value.clone());
        let modified = u64::from(previous.as_ref() != Some(&value));
        Ok(UpdateOutcome {
            matched: 1,
            modified,
        })
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(DeleteOutcome { deleted: 0 });
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(DeleteOutcome {
            deleted: (before - docs.len()) as u64,
        })
    }
}
