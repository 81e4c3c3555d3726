//! Process configuration, read from the environment once at startup.

use std::net::SocketAddr;

/// Immutable configuration for the API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub token_secret: String,
    /// Postgres connection string. Absent means the in-memory store.
    pub database_url: Option<String>,
}

impl ApiConfig {
    /// Read configuration from the environment.
    ///
    /// `PORT` defaults to 5000. A missing `ACCESS_TOKEN_SECRET` falls back
    /// to an insecure dev default with a warning, never silently.
    pub fn from_env() -> Self {
        let token_secret = std::env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("ACCESS_TOKEN_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(5000);

        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            token_secret,
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }
}
