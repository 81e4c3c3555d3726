//! The storage abstraction every backend implements.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::document::{DeleteOutcome, Document, DocumentId, UpdateOutcome};
use crate::error::StoreError;

/// Schemaless document storage over named collections.
///
/// Collections are created on first use; the store imposes no schema on
/// bodies beyond "valid JSON". Field queries compare the string form of a
/// top-level body field, which is all the storefront ever filters on.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return it with its assigned id.
    async fn insert(&self, collection: &str, body: JsonValue) -> Result<Document, StoreError>;

    /// Every document in a collection, oldest first.
    ///
    /// An unknown collection is an empty one.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Documents whose top-level `field` is the string `value`, oldest first.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// First document matching `field == value`, if any.
    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .find_by_field(collection, field, value)
            .await?
            .into_iter()
            .next())
    }

    /// Set one top-level field on the document with the given id.
    ///
    /// Missing documents are not an error: the outcome reports zero matches.
    async fn set_field(
        &self,
        collection: &str,
        id: DocumentId,
        field: &str,
        value: JsonValue,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the document with the given id, reporting how many went away.
    async fn delete(&self, collection: &str, id: DocumentId) -> Result<DeleteOutcome, StoreError>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn insert(&self, collection: &str, body: JsonValue) -> Result<Document, StoreError> {
        (**self).insert(collection, body).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        (**self).list(collection).await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).find_by_field(collection, field, value).await
    }

    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        (**self).find_one_by_field(collection, field, value).await
    }

    async fn set_field(
        &self,
        collection: &str,
        id: DocumentId,
        field: &str,
        value: JsonValue,
    ) -> Result<UpdateOutcome, StoreError> {
        (**self).set_field(collection, id, field, value).await
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<DeleteOutcome, StoreError> {
        (**self).delete(collection, id).await
    }
}
