//! Authentication route handlers.
//!
//! Login and registration are classic form posts. Failures redirect back
//! with a short error code in the query string, which the page handler
//! turns into a human message; the URL stays shareable and refreshable.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::AuthError;
use crate::state::AppState;

use super::Nav;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub display_name: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: Nav,
    pub error: Option<&'static str>,
}

/// Turn a query-string error code into the message shown above the form.
fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid email or password.",
        "email_taken" => "An account with this email already exists.",
        "password_too_short" => "Password must be at least 8 characters.",
        "password_mismatch" => "Passwords do not match.",
        "invalid_email" => "That email address doesn't look right.",
        "session" => "Something went wrong with your session. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
}

fn success_message(code: &str) -> &'static str {
    match code {
        "registered" => "Account created. Welcome!",
        _ => "Done.",
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(session: Session, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        nav: Nav::load(&session).await,
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.users());
    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                email: user.email,
                display_name: user.display_name,
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/login?error=session").into_response();
            }
            Redirect::to("/account").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Redirect::to("/login?error=credentials").into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page(
    session: Session,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        nav: Nav::load(&session).await,
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle registration form submission. New accounts are signed in
/// immediately; there is no activation email in a shop this size.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/register?error=password_mismatch").into_response();
    }

    let auth = AuthService::new(state.users());
    match auth
        .register(&form.email, &form.password, &form.display_name)
        .await
    {
        Ok(user) => {
            let current = CurrentUser {
                email: user.email,
                display_name: user.display_name,
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session after registration: {}", e);
                return Redirect::to("/login?error=session").into_response();
            }
            Redirect::to("/account?success=registered").into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/register?error=email_taken").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/register?error=password_too_short").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/register?error=invalid_email").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            Redirect::to("/register?error=failed").into_response()
        }
    }
}

/// Handle logout: drop the whole session, bag included.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/").into_response()
}
