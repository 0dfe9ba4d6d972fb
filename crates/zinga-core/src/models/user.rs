//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Anything other than `admin` is a standard account.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    /// Lenient parse used when reading stored rows.
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub purchased_modules: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_spent: f64,
    /// Argon2id PHC hash. Never leaves the server.
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Explicit record id; a random UUID is used when `None`.
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Raw password (hashed with Argon2id before storage). Accounts
    /// created without one cannot log in with a password.
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_is_standard_user() {
        let role: UserRole = serde_json::from_str("\"parent\"").unwrap();
        assert_eq!(role, UserRole::User);
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: "u1".into(),
            email: "kid@example.com".into(),
            name: "Kid".into(),
            role: UserRole::User,
            purchased_modules: vec!["counting".into()],
            created_at: Utc::now(),
            last_login: None,
            total_spent: 4.99,
            password_hash: Some("$argon2id$secret".into()),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["purchasedModules"][0], "counting");
        assert_eq!(json["totalSpent"], 4.99);
    }
}
