//! `/api/auth/*` handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{info, warn};
use zinga_auth::password;
use zinga_core::api::{ApiAck, ChangePasswordRequest, LoginRequest, LoginResponse};
use zinga_core::error::ZingaError;
use zinga_core::models::user::User;
use zinga_core::repository::UserRepository;

use crate::{error::AppError, state::AppState};

/// Look up `email` and check `password` against the stored hash.
///
/// Unknown emails, password-less accounts, and wrong passwords are
/// indistinguishable to the caller.
async fn authenticate<U: UserRepository>(
    users: &U,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = match users.get_by_email(email).await {
        Ok(user) => user,
        Err(ZingaError::NotFound { .. }) => return Err(AppError::InvalidCredentials),
        Err(e) => return Err(e.into()),
    };

    let Some(hash) = user.password_hash.as_deref() else {
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_password(password, hash).map_err(ZingaError::from)? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

pub async fn login_handler<U: UserRepository>(
    State(state): State<AppState<U>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedPayload)?;

    let user = match authenticate(state.users.as_ref(), &request.email, &request.password).await {
        Ok(user) => user,
        Err(e) => {
            warn!(email = %request.email, error = %e, "Login rejected");
            return Err(e);
        }
    };

    let user = state.users.record_login(&user.id).await?;
    info!(email = %user.email, role = user.role.as_str(), "User logged in");

    Ok(Json(LoginResponse::ok(user)))
}

pub async fn change_password_handler<U: UserRepository>(
    State(state): State<AppState<U>>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<ApiAck>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedPayload)?;

    let user = authenticate(
        state.users.as_ref(),
        &request.email,
        &request.current_password,
    )
    .await?;

    let check = password::validate_password(&request.new_password, state.min_password_length);
    if !check.valid {
        return Err(AppError::WeakPassword(check.message));
    }

    state
        .users
        .set_password(&user.id, &request.new_password)
        .await?;
    info!(email = %user.email, "Password updated");

    Ok(Json(ApiAck::ok()))
}
