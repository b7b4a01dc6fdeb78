//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check (in main.rs)
//!
//! # Products
//! GET  /products               - Product listing
//! GET  /products/{id}          - Product detail
//!
//! # Bag
//! GET  /bag                    - Bag page with checkout form
//! POST /bag/add                - Add a product
//! POST /bag/update             - Adjust a line's quantity
//! POST /bag/remove             - Remove a line
//!
//! # Checkout
//! POST /checkout               - Place the order
//! GET  /orders/{id}/payment    - Payment instructions
//! POST /orders/{id}/paid       - Buyer says they have paid
//! GET  /confirmation           - Thank-you page
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Profile and order history
//! POST /account/newsletter     - Newsletter opt-in toggle
//!
//! # Pages
//! GET  /about                  - About the shop
//! GET  /returns                - Returns policy
//! GET  /privacy                - Privacy policy
//! ```

pub mod account;
pub mod auth;
pub mod bag;
pub mod checkout;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session::keys};
use crate::state::AppState;

/// Data every page template needs for the shared nav bar.
pub struct Nav {
    pub bag_count: u32,
    pub user: Option<CurrentUser>,
}

impl Nav {
    /// Assemble the nav from the session. Session read failures render as
    /// a signed-out visitor with an empty bag rather than an error page.
    pub async fn load(session: &Session) -> Self {
        let bag_count = bag::load_bag(session).await.item_count();
        let user = session
            .get::<CurrentUser>(keys::CURRENT_USER)
            .await
            .ok()
            .flatten();
        Self { bag_count, user }
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the bag routes router.
pub fn bag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bag::show))
        .route("/add", post(bag::add))
        .route("/update", post(bag::update))
        .route("/remove", post(bag::remove))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/newsletter", post(account::set_newsletter))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Bag routes
        .nest("/bag", bag_routes())
        // Checkout
        .route("/checkout", post(checkout::place_order))
        .route("/orders/{id}/payment", get(checkout::payment))
        .route("/orders/{id}/paid", post(checkout::paid))
        .route("/confirmation", get(checkout::confirmation))
        // Auth routes
        .merge(auth_routes())
        // Account routes
        .nest("/account", account_routes())
        // Markdown pages
        .route("/about", get(pages::about))
        .route("/returns", get(pages::returns))
        .route("/privacy", get(pages::privacy))
}
