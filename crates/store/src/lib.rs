//! `freshmart-store`: schemaless document storage for the storefront.
//!
//! Everything the API serves (users, products, carts, ...) lives in named
//! collections of JSON documents behind the [`DocumentStore`] trait. Two
//! backends are provided: an in-memory store for tests and development, and
//! a Postgres store that keeps each collection in a JSONB table.

pub mod document;
pub mod error;
pub mod in_memory;
pub mod postgres;
pub mod store;

pub use document::{DeleteOutcome, Document, DocumentId, UpdateOutcome};
pub use error::StoreError;
pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use store::DocumentStore;
