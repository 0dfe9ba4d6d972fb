//! Authentication error types.

use thiserror::Error;
use zinga_core::error::ZingaError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("account is locked for {minutes} minutes")]
    AccountLocked { minutes: i64 },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}

impl From<AuthError> for ZingaError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccountLocked { .. } => ZingaError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Storage(msg) => ZingaError::Storage(msg),
            AuthError::Serialization(e) => ZingaError::Storage(e.to_string()),
            AuthError::Transport(msg) => ZingaError::Internal(msg),
            AuthError::Crypto(msg) => ZingaError::Crypto(msg),
        }
    }
}
