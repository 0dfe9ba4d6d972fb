//! Client-side auth manager: login, session lifecycle, and login
//! throttling over a [`KeyValueStore`].
//!
//! Public operations never surface errors: storage, decoding, and
//! transport failures are logged and folded into a failed outcome or a
//! safe default.

use chrono::{Duration, Utc};
use tracing::{error, info, warn};
use zinga_core::error::ZingaResult;
use zinga_core::models::login_attempt::LoginAttempt;
use zinga_core::models::session::AuthSession;
use zinga_core::models::user::User;
use zinga_core::repository::UserRepository;

use crate::backend::AuthBackend;
use crate::config::AuthConfig;
use crate::demo;
use crate::error::AuthError;
use crate::lockout::LockoutPolicy;
use crate::password;
use crate::storage::KeyValueStore;
use crate::token;

const LOGIN_ERROR: &str = "An error occurred during login";
const PASSWORD_CHANGE_ERROR: &str = "An error occurred while changing password";

/// Result of [`AuthManager::login`].
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub success: bool,
    pub user: Option<User>,
    pub message: String,
    pub session: Option<AuthSession>,
}

impl LoginOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            message: message.into(),
            session: None,
        }
    }
}

/// Result of [`AuthManager::change_password`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChangeOutcome {
    pub success: bool,
    pub message: String,
}

impl PasswordChangeOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Holds at most one session in the store and throttles failed logins
/// per email.
pub struct AuthManager<B: AuthBackend, K: KeyValueStore> {
    backend: B,
    store: K,
    config: AuthConfig,
    lockout: LockoutPolicy,
}

impl<B: AuthBackend, K: KeyValueStore> AuthManager<B, K> {
    pub fn new(backend: B, store: K, config: AuthConfig) -> Self {
        let lockout = LockoutPolicy::from_config(&config);
        Self {
            backend,
            store,
            config,
            lockout,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate against the backend and persist a new session.
    ///
    /// Emails with too many recent failures are rejected before the
    /// backend is contacted.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.try_login(email, password).await {
            Ok(outcome) => outcome,
            Err(AuthError::AccountLocked { minutes }) => {
                warn!(email, minutes, "Login rejected, account locked out");
                LoginOutcome::failure(format!(
                    "Account locked due to too many failed attempts. Try again in {minutes} minutes."
                ))
            }
            Err(e) => {
                error!(error = %e, email, "Login error");
                LoginOutcome::failure(LOGIN_ERROR)
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if self.is_locked_out(email) {
            return Err(AuthError::AccountLocked {
                minutes: self.lockout.lockout_minutes(),
            });
        }

        let response = self.backend.login(email, password).await?;

        if !response.success {
            self.record_login_attempt(email, false);
            return Ok(LoginOutcome::failure(
                response
                    .error
                    .unwrap_or_else(|| "Invalid email or password".into()),
            ));
        }

        let Some(user) = response.user else {
            self.record_login_attempt(email, false);
            return Ok(LoginOutcome::failure("Authentication failed"));
        };

        let now = Utc::now();
        let lifetime = if user.is_admin() {
            self.config.admin_session_lifetime_secs
        } else {
            self.config.session_lifetime_secs
        };
        let session = AuthSession {
            user: user.clone(),
            token: token::generate_session_token(),
            expires_at: now + Duration::seconds(lifetime as i64),
            login_time: now,
            last_activity: now,
            ip_address: None,
            user_agent: self.config.user_agent.clone(),
        };

        self.write_session(&session)?;
        self.record_login_attempt(email, true);

        info!(email, role = user.role.as_str(), "Login successful");
        Ok(LoginOutcome {
            success: true,
            user: Some(user),
            message: "Login successful".into(),
            session: Some(session),
        })
    }

    /// Read the persisted session.
    ///
    /// An expired session is deleted and `None` is returned. Otherwise
    /// `last_activity` is bumped to now and written back before the
    /// session is returned.
    pub fn current_session(&self) -> Option<AuthSession> {
        match self.try_current_session() {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Error getting session");
                None
            }
        }
    }

    fn try_current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        let Some(raw) = self.store.get_item(&self.config.session_key)? else {
            return Ok(None);
        };
        let mut session: AuthSession = serde_json::from_str(&raw)?;

        let now = Utc::now();
        if session.is_expired_at(now) {
            info!(email = %session.user.email, "Session expired");
            self.logout();
            return Ok(None);
        }

        session.last_activity = now;
        self.write_session(&session)?;
        Ok(Some(session))
    }

    /// Delete the persisted session.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove_item(&self.config.session_key) {
            error!(error = %e, "Error removing session");
        }
    }

    /// Re-authenticate with `current_password`, check the strength of
    /// `new_password`, then persist it through the backend.
    ///
    /// Re-authenticating goes through [`login`](Self::login), so it
    /// counts toward lockout and replaces the stored session.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        session: &AuthSession,
    ) -> PasswordChangeOutcome {
        let email = session.user.email.as_str();

        let relogin = self.login(email, current_password).await;
        if !relogin.success {
            return PasswordChangeOutcome::failure("Current password is incorrect");
        }

        let check = password::validate_password(new_password, self.config.min_password_length);
        if !check.valid {
            return PasswordChangeOutcome::failure(check.message);
        }

        match self
            .backend
            .change_password(email, current_password, new_password)
            .await
        {
            Ok(ack) if ack.success => {
                info!(email, "Password changed");
                PasswordChangeOutcome {
                    success: true,
                    message: "Password changed successfully".into(),
                }
            }
            Ok(ack) => PasswordChangeOutcome::failure(
                ack.error.unwrap_or_else(|| PASSWORD_CHANGE_ERROR.into()),
            ),
            Err(e) => {
                error!(error = %e, email, "Password change error");
                PasswordChangeOutcome::failure(PASSWORD_CHANGE_ERROR)
            }
        }
    }

    /// Full login attempt log, oldest first.
    pub fn login_attempts(&self) -> Vec<LoginAttempt> {
        match self.read_attempts() {
            Ok(attempts) => attempts,
            Err(e) => {
                error!(error = %e, "Error getting login attempts");
                Vec::new()
            }
        }
    }

    pub fn clear_login_attempts(&self) {
        if let Err(e) = self.store.remove_item(&self.config.attempts_key) {
            error!(error = %e, "Error clearing login attempts");
        }
    }

    /// Seed the demo admin account if it is absent.
    pub async fn create_demo_accounts<U: UserRepository>(&self, repo: &U) -> ZingaResult<bool> {
        demo::create_demo_accounts(repo, self.config.demo_admin_password.as_deref()).await
    }

    fn is_locked_out(&self, email: &str) -> bool {
        match self.read_attempts() {
            Ok(attempts) => self.lockout.is_locked_out(&attempts, email, Utc::now()),
            Err(e) => {
                error!(error = %e, "Error checking lockout");
                false
            }
        }
    }

    fn record_login_attempt(&self, email: &str, success: bool) {
        let result = self.read_attempts().and_then(|mut attempts| {
            self.lockout.record(
                &mut attempts,
                LoginAttempt {
                    email: email.to_string(),
                    timestamp: Utc::now(),
                    success,
                    ip_address: self.config.attempt_ip_address.clone(),
                },
            );
            let raw = serde_json::to_string(&attempts)?;
            self.store.set_item(&self.config.attempts_key, &raw)
        });
        if let Err(e) = result {
            error!(error = %e, email, "Error recording login attempt");
        }
    }

    fn read_attempts(&self) -> Result<Vec<LoginAttempt>, AuthError> {
        match self.store.get_item(&self.config.attempts_key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_session(&self, session: &AuthSession) -> Result<(), AuthError> {
        let raw = serde_json::to_string(session)?;
        self.store.set_item(&self.config.session_key, &raw)
    }
}

/// True when a session is present and belongs to an admin.
pub fn is_admin(session: Option<&AuthSession>) -> bool {
    session.is_some_and(|s| s.user.is_admin())
}

/// True when a session is present and not yet expired.
pub fn is_session_valid(session: Option<&AuthSession>) -> bool {
    session.is_some_and(|s| s.is_valid_at(Utc::now()))
}
