//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async.

use crate::error::ZingaResult;
use crate::models::user::{CreateUser, User};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = ZingaResult<User>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = ZingaResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = ZingaResult<User>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = ZingaResult<PaginatedResult<User>>> + Send;
    /// Stamp `last_login` with the current time.
    fn record_login(&self, id: &str) -> impl Future<Output = ZingaResult<User>> + Send;
    /// Add a module to the user's purchases and accumulate the spend.
    fn record_purchase(
        &self,
        id: &str,
        module_id: &str,
        amount: f64,
    ) -> impl Future<Output = ZingaResult<User>> + Send;
    /// Replace the stored credential with a hash of `password`.
    fn set_password(&self, id: &str, password: &str)
    -> impl Future<Output = ZingaResult<()>> + Send;
}
