//! Remote authentication endpoint client.

use reqwest::Client;
use tracing::debug;
use zinga_core::api::{ApiAck, ChangePasswordRequest, LoginRequest, LoginResponse};

use crate::error::AuthError;

/// The remote side of authentication.
///
/// Implementations report rejected credentials as a response with
/// `success == false`; `Err` is reserved for transport and decoding
/// failures.
pub trait AuthBackend: Send + Sync {
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, AuthError>> + Send;

    fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> impl Future<Output = Result<ApiAck, AuthError>> + Send;
}

/// [`AuthBackend`] over HTTP against a Zinga Linga server.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: Client,
    base_url: String,
}

impl HttpAuthBackend {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let mut body: LoginResponse = response.json().await?;
        debug!(%status, success = body.success, "Login endpoint replied");
        if !status.is_success() {
            body.success = false;
        }
        Ok(body)
    }

    async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<ApiAck, AuthError> {
        let response = self
            .client
            .post(self.url("/api/auth/change-password"))
            .json(&ChangePasswordRequest {
                email: email.to_string(),
                current_password: current_password.to_string(),
                new_password: new_password.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let mut body: ApiAck = response.json().await?;
        if !status.is_success() {
            body.success = false;
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpAuthBackend::with_client(Client::new(), "http://localhost:3000/");
        assert_eq!(
            backend.url("/api/auth/login"),
            "http://localhost:3000/api/auth/login"
        );
    }
}
