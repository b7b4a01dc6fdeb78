//! Application services sitting between the routes and the stores.

pub mod auth;
pub mod checkout;

pub use auth::AuthService;
pub use checkout::CheckoutService;
