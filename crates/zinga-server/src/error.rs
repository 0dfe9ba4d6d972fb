use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use zinga_core::api::ApiAck;
use zinga_core::error::ZingaError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Startup failed: {0}")]
    Startup(String),

    #[error(transparent)]
    Domain(#[from] ZingaError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedPayload | AppError::WeakPassword(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Startup(_) | AppError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ApiAck::failed(message))).into_response()
    }
}
