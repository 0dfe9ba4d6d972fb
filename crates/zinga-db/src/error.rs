//! Database-specific error types and conversions.

use zinga_core::error::ZingaError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DbError> for ZingaError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ZingaError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => ZingaError::AlreadyExists { entity },
            DbError::PasswordHash(msg) => ZingaError::Crypto(msg),
            other => ZingaError::Database(other.to_string()),
        }
    }
}
