//! Infrastructure wiring: the long-lived handles every request shares.

use std::sync::Arc;

use freshmart_auth::TokenCodec;
use freshmart_identity::UserDirectory;
use freshmart_store::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError};

use crate::config::ApiConfig;

/// Handles built once at startup and cloned into every handler via an
/// `Extension` layer.
pub struct AppServices {
    /// Raw document access for the catalog and cart collections.
    pub store: Arc<dyn DocumentStore>,
    /// Typed user operations on top of the same store.
    pub directory: UserDirectory,
    pub codec: TokenCodec,
}

impl AppServices {
    /// Wire services from configuration.
    ///
    /// `DATABASE_URL` selects Postgres; without it the process runs on an
    /// in-memory store, which is only good for development.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn DocumentStore> = match &config.database_url {
            Some(url) => Arc::new(PostgresDocumentStore::connect(url).await?),
            None => {
                tracing::warn!("DATABASE_URL not set; documents live in process memory only");
                Arc::new(InMemoryDocumentStore::new())
            }
        };

        Ok(Self::with_store(store, &config.token_secret))
    }

    /// Wire services over an explicit store. Tests use this.
    pub fn with_store(store: Arc<dyn DocumentStore>, token_secret: &str) -> Self {
        Self {
            directory: UserDirectory::new(store.clone()),
            codec: TokenCodec::new(token_secret.as_bytes()),
            store,
        }
    }
}
