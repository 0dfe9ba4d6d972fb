//! Zinga Linga Auth: client-held sessions, login throttling,
//! password policy, and demo account seeding.

pub mod backend;
pub mod config;
pub mod demo;
pub mod error;
pub mod lockout;
pub mod manager;
pub mod password;
pub mod storage;
pub mod token;

pub use backend::{AuthBackend, HttpAuthBackend};
pub use config::AuthConfig;
pub use error::AuthError;
pub use manager::{AuthManager, LoginOutcome, PasswordChangeOutcome, is_admin, is_session_valid};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
