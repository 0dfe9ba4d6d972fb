use axum::{
    Router,
    routing::{get, post},
};
use zinga_core::repository::UserRepository;

use crate::{auth, pages, state::AppState};

pub fn router<U: UserRepository + 'static>(state: AppState<U>) -> Router {
    Router::new()
        .route("/", get(pages::home_handler))
        .route("/terms", get(pages::terms_handler))
        .route("/api/auth/login", post(auth::login_handler::<U>))
        .route(
            "/api/auth/change-password",
            post(auth::change_password_handler::<U>),
        )
        .with_state(state)
}
