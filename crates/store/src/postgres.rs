//! Postgres-backed store.
//!
//! One JSONB table holds every collection; the storefront's collections are
//! small enough that per-collection tables would buy nothing. Field queries
//! go through the `->>` operator so they see the same string comparison the
//! in-memory store does.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::document::{DeleteOutcome, Document, DocumentId, UpdateOutcome};
use crate::error::StoreError;
use crate::store::DocumentStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT        NOT NULL,
    id          UUID        NOT NULL,
    body        JSONB       NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, id)
);
CREATE INDEX IF NOT EXISTS documents_by_collection
    ON documents (collection, created_at);
"#;

/// [`DocumentStore`] over a Postgres connection pool.
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Wrap an existing pool. The schema must already be in place.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and make sure the schema exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(url).await.map_err(StoreError::backend)?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Idempotent schema bootstrap.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(StoreError::backend)?;
        }
        tracing::debug!("document schema ensured");
        Ok(())
    }

    fn row_to_document(row: &sqlx::postgres::PgRow) -> Result<Document, StoreError> {
        let id: Uuid = row.try_get("id").map_err(StoreError::backend)?;
        let body: JsonValue = row.try_get("body").map_err(StoreError::backend)?;
        Ok(Document {
            id: DocumentId::from_uuid(id),
            body,
        })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(&self, collection: &str, body: JsonValue) -> Result<Document, StoreError> {
        let document = Document {
            id: DocumentId::new(),
            body,
        };

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(document.id.as_uuid())
            .bind(&document.body)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(document)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, body FROM documents \
             WHERE collection = $1 AND body ->> $2 = $3 \
             ORDER BY created_at, id",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn set_field(
        &self,
        collection: &str,
        id: DocumentId,
        field: &str,
        value: JsonValue,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;

        // Lock the row first so matched/modified reflect one point in time.
        let current = sqlx::query(
            "SELECT jsonb_typeof(body) = 'object' AS is_object, \
                    body -> $3 IS NOT DISTINCT FROM $4 AS already_set \
             FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
        )
        .bind(collection)
        .bind(id.as_uuid())
        .bind(field)
        .bind(&value)
        .fetch_optional(&mut *tx)
        .await
        .map_err(StoreError::backend)?;

        let Some(row) = current else {
            return Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            });
        };
        let is_object: bool = row.try_get("is_object").map_err(StoreError::backend)?;
        let already_set: bool = row.try_get("already_set").map_err(StoreError::backend)?;

        // Non-object bodies have no fields to set; a field already holding
        // the value needs no write. Both count as matched, not modified.
        if !is_object || already_set {
            return Ok(UpdateOutcome {
                matched: 1,
                modified: 0,
            });
        }

        let result = sqlx::query(
            "UPDATE documents SET body = jsonb_set(body, ARRAY[$3], $4, true) \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id.as_uuid())
        .bind(field)
        .bind(&value)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::backend)?;

        tx.commit().await.map_err(StoreError::backend)?;

        Ok(UpdateOutcome {
            matched: 1,
            modified: result.rows_affected(),
        })
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<DeleteOutcome, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(DeleteOutcome {
            deleted: result.rows_affected(),
        })
    }
}
