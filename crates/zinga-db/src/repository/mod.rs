//! SurrealDB repository implementations.

mod user;

pub use user::{SurrealUserRepository, hash_password};
