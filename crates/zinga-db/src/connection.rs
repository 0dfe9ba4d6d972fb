//! SurrealDB connection management.

use std::env;

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address without a scheme (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "zinga".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

impl DbConfig {
    /// Overlay `DATABASE_URL`, `DB_NAMESPACE`, `DB_DATABASE`,
    /// `DB_USERNAME` and `DB_PASSWORD` on the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("DATABASE_URL")
                .map(|url| ws_address(&url).to_string())
                .unwrap_or(defaults.url),
            namespace: env::var("DB_NAMESPACE").unwrap_or(defaults.namespace),
            database: env::var("DB_DATABASE").unwrap_or(defaults.database),
            username: env::var("DB_USERNAME").unwrap_or(defaults.username),
            password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

/// Strip a `ws://` scheme and trailing slash; the `Ws` engine adds its own.
pub fn ws_address(url: &str) -> &str {
    let url = url.trim();
    url.strip_prefix("ws://")
        .unwrap_or(url)
        .trim_end_matches('/')
}

/// Manages a connection to SurrealDB.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root, selects the configured namespace and
    /// database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(ws_address(&config.url)).await?;

        db.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_scheme_is_stripped() {
        assert_eq!(ws_address("ws://db:8000"), "db:8000");
        assert_eq!(ws_address("ws://db:8000/"), "db:8000");
        assert_eq!(ws_address("127.0.0.1:8000"), "127.0.0.1:8000");
    }
}
