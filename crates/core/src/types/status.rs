//! Status and method enums for orders.

use serde::{Deserialize, Serialize};

/// Where an order sits in its (entirely manual) lifecycle.
///
/// Orders are created as `PendingPayment` and only ever advanced by the
/// shop owner after an out-of-band payment confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PendingPayment,
    Paid,
    Fulfilled,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingPayment => write!(f, "Pending Payment"),
            Self::Paid => write!(f, "Paid"),
            Self::Fulfilled => write!(f, "Fulfilled"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// How the buyer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Free local pickup, coordinated by phone.
    #[default]
    Pickup,
    /// Shipped to the buyer's address; cost from the shipping table.
    Shipping,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pickup => write!(f, "Local Pickup"),
            Self::Shipping => write!(f, "Shipping"),
        }
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(Self::Pickup),
            "shipping" => Ok(Self::Shipping),
            _ => Err(format!("invalid delivery method: {s}")),
        }
    }
}

/// External platform the buyer says they will settle on.
///
/// Never verified programmatically; recorded on the order for the shop
/// owner to match against an incoming payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    PayPal,
    CashApp,
    Zelle,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PayPal => write!(f, "PayPal"),
            Self::CashApp => write!(f, "CashApp"),
            Self::Zelle => write!(f, "Zelle"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::PendingPayment.to_string(), "Pending Payment");
        assert_eq!(OrderStatus::default(), OrderStatus::PendingPayment);
    }

    #[test]
    fn test_delivery_method_from_str() {
        assert_eq!(
            "pickup".parse::<DeliveryMethod>().unwrap(),
            DeliveryMethod::Pickup
        );
        assert_eq!(
            "shipping".parse::<DeliveryMethod>().unwrap(),
            DeliveryMethod::Shipping
        );
        assert!("courier".parse::<DeliveryMethod>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"pending_payment\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::PendingPayment);
    }
}
