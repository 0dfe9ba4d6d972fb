//! Zinga Linga Server: application entry point.

use tracing_subscriber::EnvFilter;
use zinga_db::MigrationConfig;
use zinga_server::{AppError, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("zinga=info".parse().unwrap()))
        .json()
        .init();

    match std::env::args().nth(1).as_deref() {
        Some("generate-migrations") => {
            let config = MigrationConfig::from_env().map_err(|e| AppError::Startup(e.to_string()))?;
            let written = config
                .generate()
                .map_err(|e| AppError::Startup(e.to_string()))?;
            tracing::info!(count = written.len(), dir = %config.out_dir.display(), "Migrations generated");
            Ok(())
        }
        Some("migrate") => {
            let config = MigrationConfig::from_env().map_err(|e| AppError::Startup(e.to_string()))?;
            let manager = zinga_db::DbManager::connect(&config.db)
                .await
                .map_err(|e| AppError::Startup(e.to_string()))?;
            zinga_db::run_migrations(manager.client())
                .await
                .map_err(|e| AppError::Startup(e.to_string()))?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        _ => {
            tracing::info!("Starting Zinga Linga server...");
            zinga_server::run(ServerConfig::load()).await?;
            tracing::info!("Zinga Linga server stopped.");
            Ok(())
        }
    }
}
