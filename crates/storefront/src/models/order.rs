//! Orders as written to `orders.json`.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use sura_core::{DeliveryMethod, Email, OrderId, OrderStatus, PaymentMethod, Price, ProductId};

/// One line of a placed order: a snapshot of the product at checkout time.
///
/// The catalog can be reorganized or repriced after the fact without
/// changing what the buyer agreed to pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl OrderLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Who placed the order and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

/// A placed order, pending manual settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub customer: Customer,
    pub delivery: DeliveryMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    pub lines: Vec<OrderLine>,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Total number of items across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Generate an order id of the form `SURA-<UTC timestamp>-<suffix>`.
    ///
    /// The timestamp gives the shop owner a sortable, human-readable handle;
    /// the random alphanumeric suffix disambiguates orders placed within the
    /// same second.
    #[must_use]
    pub fn generate_id(placed_at: DateTime<Utc>) -> OrderId {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(4)
            .map(char::from)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        OrderId::new(format!(
            "SURA-{}-{suffix}",
            placed_at.format("%Y%m%d%H%M%S")
        ))
    }
}
