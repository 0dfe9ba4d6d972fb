use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};
use zinga_db::DbConfig;

pub struct ServerConfig {
    pub port: u16,
    pub db: DbConfig,
    pub min_password_length: usize,
    pub demo_admin_password: Option<String>,
}

impl ServerConfig {
    pub fn load() -> Self {
        Self {
            port: try_load("ZINGA_PORT", 3000),
            db: DbConfig::from_env(),
            min_password_length: try_load("ZINGA_MIN_PASSWORD_LENGTH", 8),
            demo_admin_password: env::var("ZINGA_DEMO_ADMIN_PASSWORD").ok(),
        }
    }
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
