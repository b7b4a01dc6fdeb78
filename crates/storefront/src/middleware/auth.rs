//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a signed-in customer in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::CurrentUser;
use crate::models::session::keys;

/// Extractor that requires a signed-in customer.
///
/// If nobody is signed in, redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.display_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is signed in.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (when the session layer is missing).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current customer.
///
/// Unlike `RequireAuth`, this never rejects the request.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current customer in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await
}

/// Helper to clear the current customer from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    Ok(())
}
