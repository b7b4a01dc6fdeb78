//! Markdown-backed informational pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

use super::Nav;

/// Shared template for every markdown page.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct PageTemplate {
    pub nav: Nav,
    pub title: String,
    pub content_html: String,
    pub updated_at: Option<String>,
}

async fn render(state: &AppState, session: &Session, slug: &str) -> Result<PageTemplate> {
    let page = state
        .content()
        .get_page(slug)
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))?;

    Ok(PageTemplate {
        nav: Nav::load(session).await,
        title: page.meta.title.clone(),
        content_html: page.content_html.clone(),
        updated_at: page
            .meta
            .updated_at
            .map(|d| d.format("%B %e, %Y").to_string()),
    })
}

/// About the shop.
pub async fn about(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    render(&state, &session, "about").await
}

/// Returns policy.
pub async fn returns(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    render(&state, &session, "returns").await
}

/// Privacy policy.
pub async fn privacy(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    render(&state, &session, "privacy").await
}
