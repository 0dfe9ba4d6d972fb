//! Migration tool configuration: where the schema lives, where
//! generated scripts go, and which database they target.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::connection::DbConfig;
use crate::error::DbError;

/// Query language generated migration scripts are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    SurrealQl,
}

impl Dialect {
    /// File extension for scripts in this dialect.
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::SurrealQl => "surql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::SurrealQl => f.write_str("surrealql"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Module the versioned schema is declared in.
    pub schema: &'static str,
    /// Directory generated migration scripts are written to.
    pub out_dir: PathBuf,
    pub dialect: Dialect,
    /// Target database; `url` comes from `DATABASE_URL`.
    pub db: DbConfig,
}

impl MigrationConfig {
    pub const SCHEMA: &'static str = "zinga_db::schema";

    pub fn new(db: DbConfig) -> Self {
        Self {
            schema: Self::SCHEMA,
            out_dir: PathBuf::from("./migrations"),
            dialect: Dialect::SurrealQl,
            db,
        }
    }

    /// Build from the environment. `DATABASE_URL` is required;
    /// `MIGRATIONS_DIR` overrides the output directory.
    pub fn from_env() -> Result<Self, DbError> {
        if !env::var("DATABASE_URL").is_ok_and(|v| !v.trim().is_empty()) {
            return Err(DbError::Config("DATABASE_URL must be set".into()));
        }
        let mut config = Self::new(DbConfig::from_env());
        if let Ok(dir) = env::var("MIGRATIONS_DIR") {
            config.out_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Write one script per migration into `out_dir`.
    pub fn generate(&self) -> Result<Vec<PathBuf>, DbError> {
        crate::schema::write_migration_scripts(&self.out_dir, self.dialect)
    }
}
