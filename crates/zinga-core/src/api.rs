//! Wire types for the `/api/auth/*` endpoints, shared by the server
//! and the client-side auth manager.

use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `{success, user?, error?}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    pub fn ok(user: User) -> Self {
        Self {
            success: true,
            user: Some(user),
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
}

/// Generic `{success, error?}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiAck {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_tolerates_missing_fields() {
        let resp: LoginResponse = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.user.is_none());
        assert_eq!(resp.error.as_deref(), Some("nope"));
    }

    #[test]
    fn change_password_request_is_camel_case() {
        let req = ChangePasswordRequest {
            email: "a@b.c".into(),
            current_password: "old".into(),
            new_password: "new".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["currentPassword"], "old");
        assert_eq!(json["newPassword"], "new");
    }
}
