//! Zinga Linga Server: the `/api/auth/*` endpoints the client auth
//! manager talks to, plus the storefront's static pages.

pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

use tokio::net::TcpListener;
use tracing::info;
use zinga_auth::demo;
use zinga_db::repository::SurrealUserRepository;
use zinga_db::{DbManager, run_migrations};

pub use config::ServerConfig;
pub use error::AppError;
pub use routes::router;
pub use state::AppState;

/// Connect, migrate, seed, and serve until the listener fails.
pub async fn run(config: ServerConfig) -> Result<(), AppError> {
    let manager = DbManager::connect(&config.db)
        .await
        .map_err(|e| AppError::Startup(format!("database connection failed: {e}")))?;
    run_migrations(manager.client())
        .await
        .map_err(|e| AppError::Startup(e.to_string()))?;

    let users = SurrealUserRepository::new(manager.client().clone());
    demo::create_demo_accounts(&users, config.demo_admin_password.as_deref()).await?;

    let state = AppState::new(users, config.min_password_length);
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(|e| AppError::Startup(format!("bind failed: {e}")))?;
    info!(port = config.port, "Listening");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| AppError::Startup(e.to_string()))
}
