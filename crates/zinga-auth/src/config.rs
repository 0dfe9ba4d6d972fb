//! Authentication configuration.

/// Configuration for the client-side auth manager.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Storage key holding the serialized session.
    pub session_key: String,
    /// Storage key holding the serialized login attempt log.
    pub attempts_key: String,
    /// Failed attempts within the lockout window that trigger a lockout (default: 5).
    pub max_login_attempts: u32,
    /// Trailing window over which failures are counted, in seconds (default: 900 = 15 min).
    pub lockout_duration_secs: u64,
    /// Session lifetime for standard accounts in seconds (default: 28_800 = 8 hours).
    pub session_lifetime_secs: u64,
    /// Session lifetime for admin accounts in seconds (default: 7_200 = 2 hours).
    pub admin_session_lifetime_secs: u64,
    /// Most recent attempts kept in the log (default: 100).
    pub max_recorded_attempts: usize,
    /// Minimum password length for policy enforcement.
    pub min_password_length: usize,
    /// User agent stamped on new sessions.
    pub user_agent: Option<String>,
    /// Address recorded on login attempts.
    pub attempt_ip_address: Option<String>,
    /// Password given to the seeded demo admin. `None` seeds an
    /// account that cannot log in with a password.
    pub demo_admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_key: "zinga-linga-session".into(),
            attempts_key: "zinga-linga-login-attempts".into(),
            max_login_attempts: 5,
            lockout_duration_secs: 900,
            session_lifetime_secs: 28_800,
            admin_session_lifetime_secs: 7_200,
            max_recorded_attempts: 100,
            min_password_length: 8,
            user_agent: Some(concat!("zinga-auth/", env!("CARGO_PKG_VERSION")).into()),
            attempt_ip_address: Some("localhost".into()),
            demo_admin_password: None,
        }
    }
}
