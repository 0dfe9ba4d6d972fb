//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode. Record ids are strings;
//! timestamps are stored as RFC 3339 strings; enums are stored as
//! strings with ASSERT constraints.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::config::Dialect;
use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
}

/// A versioned schema change.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1: users
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['admin', 'user'];
DEFINE FIELD purchased_modules ON TABLE user TYPE array<string> \
    DEFAULT [];
DEFINE FIELD total_spent ON TABLE user TYPE float DEFAULT 0.0;
DEFINE FIELD password_hash ON TABLE user TYPE option<string>;
DEFINE FIELD created_at ON TABLE user TYPE string;
DEFINE FIELD last_login ON TABLE user TYPE option<string>;
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;
";

/// Apply all pending migrations to the database.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

        info!(version = migration.version, "Migration applied successfully");
    }

    Ok(())
}

/// All migrations in ascending version order.
pub fn migrations() -> &'static [Migration] {
    MIGRATIONS
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

/// Write each migration to `out_dir` as `NNNN_<name>.<ext>`.
///
/// Existing files with the same names are overwritten.
pub fn write_migration_scripts(out_dir: &Path, dialect: Dialect) -> Result<Vec<PathBuf>, DbError> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(MIGRATIONS.len());
    for migration in MIGRATIONS {
        let path = out_dir.join(format!(
            "{:04}_{}.{}",
            migration.version,
            migration.name,
            dialect.extension()
        ));
        fs::write(&path, migration.sql)?;
        written.push(path);
    }
    info!(dir = %out_dir.display(), count = written.len(), "Wrote migration scripts");
    Ok(written)
}
