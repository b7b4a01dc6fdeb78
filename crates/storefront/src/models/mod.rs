//! Domain models persisted to the JSON stores or carried in the session.

pub mod cart;
pub mod order;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine};
pub use order::{Customer, Order, OrderLine};
pub use session::CurrentUser;
pub use user::UserRecord;
