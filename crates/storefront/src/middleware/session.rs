//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The shop runs as a
//! single process, so sessions (and with them, bags) reset on restart;
//! orders are already on disk by then.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sura_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
