//! Store failure modes.

use thiserror::Error;

/// Failure raised by a store backend.
///
/// Backend details stay inside the message; callers only branch on the
/// variant, never the text.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend itself failed (connection, query, poisoned lock).
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A stored body could not be read back as JSON.
    #[error("stored document is not valid JSON: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
