//! Authentication error types.

use thiserror::Error;

use crate::store::RepositoryError;

/// Errors that can occur during registration or sign-in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email address failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] sura_core::EmailError),

    /// Password too short.
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    /// An account already exists for this email.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Unknown email or wrong password. Deliberately one variant: sign-in
    /// must not reveal which half was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing or verification failed.
    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// The underlying user store failed.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::PasswordHash(e.to_string())
    }
}

impl From<RepositoryError> for AuthError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(_) => Self::UserAlreadyExists,
            RepositoryError::NotFound => Self::InvalidCredentials,
            other => Self::Repository(other),
        }
    }
}
