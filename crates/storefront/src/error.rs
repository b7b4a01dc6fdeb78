//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::store::RepositoryError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// JSON store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Store(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::PasswordHash(_) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_owned(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_owned()
                }
                AuthError::WeakPassword(min) => {
                    format!("Password must be at least {min} characters")
                }
                AuthError::InvalidEmail(_) => "Invalid email address".to_owned(),
                AuthError::PasswordHash(_) | AuthError::Repository(_) => {
                    "Authentication error".to_owned()
                }
            },
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product abyss".to_owned());
        assert_eq!(err.to_string(), "Not found: product abyss");

        let err = AppError::BadRequest("invalid input".to_owned());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Store(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }
}
