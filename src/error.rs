use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Authentication required: {0}")]
    Authentication(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(StoreError),

    #[error("Write failed: {0}")]
    Write(StoreError),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Auth(ref err) => match err {
                AuthError::EmailAlreadyInUse => {
                    (StatusCode::CONFLICT, "This email is already in use.")
                }
                AuthError::WeakPassword => (
                    StatusCode::BAD_REQUEST,
                    "Password should be at least 6 characters.",
                ),
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid email or password.")
                }
                AuthError::Provider(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to authenticate. Please try again.",
                ),
            },
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::Retrieval(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to load data from the backing store",
            ),
            AppError::Write(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to save changes. Please try again.",
            ),
            AppError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred",
            ),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
