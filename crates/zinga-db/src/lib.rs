//! Zinga Linga Database: SurrealDB connection management, schema
//! migrations, and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Migration configuration ([`MigrationConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Error types ([`DbError`])

mod config;
mod connection;
mod error;
pub mod repository;
mod schema;

pub use config::{Dialect, MigrationConfig};
pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{Migration, migrations, run_migrations, schema_v1, write_migration_scripts};
