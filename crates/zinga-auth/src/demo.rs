//! First-run demo account seeding.

use tracing::info;
use zinga_core::error::{ZingaError, ZingaResult};
use zinga_core::models::user::{CreateUser, UserRole};
use zinga_core::repository::UserRepository;

pub const DEMO_ADMIN_ID: &str = "admin-demo";
pub const DEMO_ADMIN_EMAIL: &str = "admin@zingalinga.com";
pub const DEMO_ADMIN_NAME: &str = "Admin Demo";

/// Create the demo admin account unless one with the same email exists.
///
/// Returns `true` when the account was created. Only the admin is
/// seeded; no demo parent accounts are created.
pub async fn create_demo_accounts<U: UserRepository>(
    repo: &U,
    admin_password: Option<&str>,
) -> ZingaResult<bool> {
    match repo.get_by_email(DEMO_ADMIN_EMAIL).await {
        Ok(_) => return Ok(false),
        Err(ZingaError::NotFound { .. }) => {}
        Err(e) => return Err(e),
    }

    repo.create(CreateUser {
        id: Some(DEMO_ADMIN_ID.into()),
        email: DEMO_ADMIN_EMAIL.into(),
        name: DEMO_ADMIN_NAME.into(),
        role: UserRole::Admin,
        password: admin_password.map(str::to_string),
    })
    .await?;

    info!(email = DEMO_ADMIN_EMAIL, "Seeded demo admin account");
    Ok(true)
}
