//! Account pages (require auth).

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::Nav;

/// One past order on the account page.
pub struct OrderSummaryView {
    pub id: String,
    pub placed_at: String,
    pub item_count: u32,
    pub total: String,
    pub status: String,
}

/// Account overview template: profile, newsletter toggle, order history.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub nav: Nav,
    pub display_name: String,
    pub email: String,
    pub newsletter: bool,
    pub orders: Vec<OrderSummaryView>,
    pub success: Option<&'static str>,
}

/// Newsletter opt-in form. The checkbox is simply absent when unchecked.
#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    #[serde(default)]
    pub subscribed: Option<String>,
}

/// Query parameters carried over from registration.
#[derive(Debug, Deserialize)]
pub struct AccountQuery {
    pub success: Option<String>,
}

/// Display the account overview with order history, newest order first.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    axum::extract::Query(query): axum::extract::Query<AccountQuery>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let record = state.users().get(&user.email).await?;

    let mut orders: Vec<OrderSummaryView> = record
        .orders
        .iter()
        .map(|o| OrderSummaryView {
            id: o.id.to_string(),
            placed_at: o.placed_at.format("%B %e, %Y").to_string(),
            item_count: o.item_count(),
            total: o.total.to_string(),
            status: o.status.to_string(),
        })
        .collect();
    orders.reverse();

    Ok(AccountTemplate {
        nav: Nav::load(&session).await,
        display_name: record.display_name,
        email: record.email.to_string(),
        newsletter: record.newsletter,
        orders,
        success: query
            .success
            .as_deref()
            .map(|_| "Account created. Welcome!"),
    })
}

/// Toggle the newsletter opt-in.
pub async fn set_newsletter(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<NewsletterForm>,
) -> Result<impl IntoResponse> {
    let subscribed = form.subscribed.is_some();
    state.users().set_newsletter(&user.email, subscribed).await?;

    tracing::info!(email = %user.email, subscribed, "newsletter preference updated");
    Ok(Redirect::to("/account"))
}
