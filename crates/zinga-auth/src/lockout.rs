//! Failed-login lockout policy over the login attempt log.

use chrono::{DateTime, Duration, Utc};
use zinga_core::models::login_attempt::LoginAttempt;

use crate::config::AuthConfig;

/// Counts recent failures per email and keeps the attempt log bounded.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    max_failed_attempts: usize,
    window: Duration,
    max_recorded: usize,
}

impl LockoutPolicy {
    pub fn new(max_failed_attempts: u32, window_secs: u64, max_recorded: usize) -> Self {
        Self {
            max_failed_attempts: max_failed_attempts as usize,
            window: Duration::seconds(window_secs as i64),
            max_recorded,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.max_login_attempts,
            config.lockout_duration_secs,
            config.max_recorded_attempts,
        )
    }

    /// Failed attempts for `email` whose age is below the window.
    pub fn recent_failures(&self, attempts: &[LoginAttempt], email: &str, now: DateTime<Utc>) -> usize {
        attempts
            .iter()
            .filter(|a| a.email == email && !a.success && now - a.timestamp < self.window)
            .count()
    }

    pub fn is_locked_out(&self, attempts: &[LoginAttempt], email: &str, now: DateTime<Utc>) -> bool {
        self.recent_failures(attempts, email, now) >= self.max_failed_attempts
    }

    /// Append `attempt`, dropping the oldest entries beyond the cap.
    pub fn record(&self, attempts: &mut Vec<LoginAttempt>, attempt: LoginAttempt) {
        attempts.push(attempt);
        if attempts.len() > self.max_recorded {
            let excess = attempts.len() - self.max_recorded;
            attempts.drain(..excess);
        }
    }

    /// Lockout window rounded up to whole minutes.
    pub fn lockout_minutes(&self) -> i64 {
        (self.window.num_seconds() + 59) / 60
    }
}
