//! Values carried in the tower-sessions session.

use serde::{Deserialize, Serialize};
use sura_core::Email;

/// Session keys. Collected here so the bag, auth, and checkout handlers
/// cannot drift apart on spelling.
pub mod keys {
    pub const BAG: &str = "bag";
    pub const CURRENT_USER: &str = "current_user";
    pub const LAST_ORDER_ID: &str = "last_order_id";
}

/// The signed-in customer, as stored in the session after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: Email,
    pub display_name: String,
}
