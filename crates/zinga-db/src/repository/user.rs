//! SurrealDB implementation of [`UserRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::debug;
use uuid::Uuid;
use zinga_core::error::{ZingaError, ZingaResult};
use zinga_core::models::user::{CreateUser, User, UserRole};
use zinga_core::repository::{PaginatedResult, Pagination, UserRepository};

use crate::error::DbError;

/// DB-side row for queries where the id is already known.
#[derive(Debug, Deserialize)]
struct UserRow {
    email: String,
    name: String,
    role: String,
    #[serde(default)]
    purchased_modules: Vec<String>,
    #[serde(default)]
    total_spent: f64,
    password_hash: Option<String>,
    created_at: String,
    last_login: Option<String>,
}

/// DB-side row that includes the record id via `record::id(id)`.
#[derive(Debug, Deserialize)]
struct UserRowWithId {
    record_id: String,
    email: String,
    name: String,
    role: String,
    #[serde(default)]
    purchased_modules: Vec<String>,
    #[serde(default)]
    total_spent: f64,
    password_hash: Option<String>,
    created_at: String,
    last_login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidRow(format!("invalid {field} timestamp {raw:?}: {e}")))
}

impl UserRow {
    fn into_user(self, id: String) -> Result<User, DbError> {
        Ok(User {
            id,
            email: self.email,
            name: self.name,
            role: UserRole::parse(&self.role),
            purchased_modules: self.purchased_modules,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            last_login: self
                .last_login
                .as_deref()
                .map(|raw| parse_timestamp("last_login", raw))
                .transpose()?,
            total_spent: self.total_spent,
            password_hash: self.password_hash,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let row = UserRow {
            email: self.email,
            name: self.name,
            role: self.role,
            purchased_modules: self.purchased_modules,
            total_spent: self.total_spent,
            password_hash: self.password_hash,
            created_at: self.created_at,
            last_login: self.last_login,
        };
        row.into_user(self.record_id)
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
pub fn hash_password(password: &str) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::PasswordHash(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::PasswordHash(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

fn not_found(id: impl Into<String>) -> DbError {
    DbError::NotFound {
        entity: "user".into(),
        id: id.into(),
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> ZingaResult<User> {
        let id = input.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        let created_at = Utc::now().to_rfc3339();

        let result = self
            .db
            .query(
                "CREATE type::thing('user', $id) SET \
                 email = $email, name = $name, role = $role, \
                 purchased_modules = [], total_spent = 0.0, \
                 password_hash = $password_hash, \
                 created_at = $created_at, last_login = NONE",
            )
            .bind(("id", id.clone()))
            .bind(("email", input.email))
            .bind(("name", input.name))
            .bind(("role", input.role.as_str()))
            .bind(("password_hash", password_hash))
            .bind(("created_at", created_at))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            let msg = e.to_string();
            if msg.contains("already contains") || msg.contains("already exists") {
                DbError::AlreadyExists {
                    entity: "user".into(),
                }
            } else {
                DbError::Query(msg)
            }
        })?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id.clone()))?;
        debug!(user_id = %id, "Created user");

        row.into_user(id).map_err(Into::into)
    }

    async fn get_by_id(&self, id: &str) -> ZingaResult<User> {
        let mut result = self
            .db
            .query("SELECT * FROM type::thing('user', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        row.into_user(id.to_string()).map_err(Into::into)
    }

    async fn get_by_email(&self, email: &str) -> ZingaResult<User> {
        let mut result = self
            .db
            .query("SELECT record::id(id) AS record_id, * FROM user WHERE email = $email")
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| not_found(format!("email={email}")))?;

        row.try_into_user().map_err(Into::into)
    }

    async fn list(&self, pagination: Pagination) -> ZingaResult<PaginatedResult<User>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM user GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT record::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(UserRowWithId::try_into_user)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn record_login(&self, id: &str) -> ZingaResult<User> {
        // UPDATE does not create missing records; check first so a bad id
        // surfaces as NotFound rather than an empty result.
        self.get_by_id(id).await?;

        let mut result = self
            .db
            .query("UPDATE type::thing('user', $id) SET last_login = $now RETURN AFTER")
            .bind(("id", id.to_string()))
            .bind(("now", Utc::now().to_rfc3339()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        row.into_user(id.to_string()).map_err(Into::into)
    }

    async fn record_purchase(&self, id: &str, module_id: &str, amount: f64) -> ZingaResult<User> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ZingaError::Validation {
                message: format!("invalid purchase amount: {amount}"),
            });
        }
        self.get_by_id(id).await?;

        let mut result = self
            .db
            .query(
                "UPDATE type::thing('user', $id) SET \
                 purchased_modules = array::union(purchased_modules, [$module]), \
                 total_spent += $amount \
                 RETURN AFTER",
            )
            .bind(("id", id.to_string()))
            .bind(("module", module_id.to_string()))
            .bind(("amount", amount))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        row.into_user(id.to_string()).map_err(Into::into)
    }

    async fn set_password(&self, id: &str, password: &str) -> ZingaResult<()> {
        self.get_by_id(id).await?;
        let password_hash = hash_password(password)?;

        self.db
            .query("UPDATE type::thing('user', $id) SET password_hash = $password_hash")
            .bind(("id", id.to_string()))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
