//! Customer accounts as written to `users.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sura_core::Email;

use super::Order;

/// A customer account.
///
/// Order history is embedded rather than joined: the store is a flat JSON
/// file and the history is a convenience copy of orders that also live in
/// `orders.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: Email,
    /// Argon2 PHC string. Never the raw password.
    pub password_hash: String,
    pub display_name: String,
    #[serde(default)]
    pub newsletter: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub orders: Vec<Order>,
}
