//! Checkout: turn a bag plus contact details into a persisted order.

use chrono::Utc;
use sura_core::{DeliveryMethod, Email, PaymentMethod};
use thiserror::Error;

use crate::models::{Cart, Customer, Order, OrderLine};
use crate::shipping;
use crate::store::{OrderStore, RepositoryError, UserStore};

/// Contact and delivery details from the checkout form, already parsed.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub name: String,
    pub phone: String,
    /// Optional; recorded on the order if given.
    pub email: String,
    pub delivery: DeliveryMethod,
    pub address: String,
    pub notes: String,
    pub payment_method: Option<PaymentMethod>,
}

/// Validation and persistence failures during checkout. The message of
/// each validation variant is shown verbatim above the form.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your bag is empty.")]
    EmptyBag,

    #[error("Please enter your name.")]
    MissingName,

    #[error("Please enter a phone number so we can coordinate your order.")]
    MissingPhone,

    #[error("Please enter a shipping address.")]
    MissingAddress,

    #[error("That email address doesn't look right.")]
    InvalidEmail(#[from] sura_core::EmailError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Places orders against the order store, mirroring them into the
/// signed-in customer's history.
pub struct CheckoutService<'a> {
    orders: &'a OrderStore,
    users: &'a UserStore,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(orders: &'a OrderStore, users: &'a UserStore) -> Self {
        Self { orders, users }
    }

    /// Validate the form, persist the order, and clear the bag.
    ///
    /// The bag is only cleared after the order is safely on disk; a store
    /// failure leaves it intact so the buyer can retry. When `account` is
    /// set, the order is also appended to that customer's history, but a
    /// failure there is logged and swallowed since `orders.json` already
    /// holds the authoritative copy.
    pub async fn place_order(
        &self,
        cart: &mut Cart,
        details: OrderDetails,
        account: Option<&Email>,
    ) -> Result<Order, CheckoutError> {
        let order = build_order(cart, details)?;
        self.orders.append(&order).await?;

        if let Some(email) = account {
            if let Err(e) = self.users.append_order(email, order.clone()).await {
                tracing::warn!(
                    order_id = %order.id,
                    error = %e,
                    "order placed but not mirrored to account history"
                );
            }
        }

        cart.clear();
        tracing::info!(order_id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }
}

/// Validate the details against the bag and assemble the order snapshot.
fn build_order(cart: &Cart, details: OrderDetails) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyBag);
    }
    let name = details.name.trim();
    if name.is_empty() {
        return Err(CheckoutError::MissingName);
    }
    let phone = details.phone.trim();
    if phone.is_empty() {
        return Err(CheckoutError::MissingPhone);
    }
    let address = details.address.trim();
    if details.delivery == DeliveryMethod::Shipping && address.is_empty() {
        return Err(CheckoutError::MissingAddress);
    }
    let email = match details.email.trim() {
        "" => None,
        raw => Some(raw.parse::<Email>()?),
    };

    let subtotal = cart.subtotal();
    let shipping = match details.delivery {
        DeliveryMethod::Pickup => sura_core::Price::ZERO,
        DeliveryMethod::Shipping => shipping::quote(cart.item_count(), subtotal),
    };
    let notes = details.notes.trim();
    let placed_at = Utc::now();

    Ok(Order {
        id: Order::generate_id(placed_at),
        placed_at,
        customer: Customer {
            name: name.to_owned(),
            phone: phone.to_owned(),
            email,
        },
        delivery: details.delivery,
        address: (!address.is_empty()).then(|| address.to_owned()),
        notes: (!notes.is_empty()).then(|| notes.to_owned()),
        payment_method: details.payment_method,
        lines: cart
            .lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product_id.clone(),
                name: l.name.clone(),
                unit_price: l.unit_price,
                quantity: l.quantity,
            })
            .collect(),
        subtotal,
        shipping,
        total: subtotal + shipping,
        status: sura_core::OrderStatus::PendingPayment,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sura_core::{Price, ProductId};

    use super::*;
    use crate::catalog::Product;
    use crate::services::AuthService;

    fn product(id: &str, dollars: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_owned(),
            price: Price::from_dollars(dollars),
            description: String::new(),
            images: Vec::new(),
        }
    }

    fn details(delivery: DeliveryMethod) -> OrderDetails {
        OrderDetails {
            name: "Amina".to_owned(),
            phone: "+1-555-0100".to_owned(),
            email: String::new(),
            delivery,
            address: "12 Cedar Ln, Newark NJ".to_owned(),
            notes: String::new(),
            payment_method: Some(PaymentMethod::PayPal),
        }
    }

    fn three_item_cart() -> Cart {
        // Three $10 items: $30 subtotal
        let mut cart = Cart::default();
        let abyss = product("abyss", 10);
        cart.add(&abyss);
        cart.add(&abyss);
        cart.add(&product("acorn", 10));
        cart
    }

    #[tokio::test]
    async fn test_shipped_order_totals() {
        let dir = tempfile::tempdir().unwrap();
        let orders = OrderStore::new(dir.path());
        let users = UserStore::new(dir.path());
        let service = CheckoutService::new(&orders, &users);

        let mut cart = three_item_cart();
        let order = service
            .place_order(&mut cart, details(DeliveryMethod::Shipping), None)
            .await
            .unwrap();

        // $30 subtotal, three items: $8 shipping, $38 total
        assert_eq!(order.subtotal, Price::from_dollars(30));
        assert_eq!(order.shipping, Price::from_dollars(8));
        assert_eq!(order.total, Price::from_dollars(38));
    }

    #[tokio::test]
    async fn test_checkout_persists_one_order_and_empties_bag() {
        let dir = tempfile::tempdir().unwrap();
        let orders = OrderStore::new(dir.path());
        let users = UserStore::new(dir.path());
        let service = CheckoutService::new(&orders, &users);

        let mut cart = three_item_cart();
        service
            .place_order(&mut cart, details(DeliveryMethod::Pickup), None)
            .await
            .unwrap();

        assert!(cart.is_empty());
        assert_eq!(orders.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pickup_is_always_free() {
        let dir = tempfile::tempdir().unwrap();
        let orders = OrderStore::new(dir.path());
        let users = UserStore::new(dir.path());
        let service = CheckoutService::new(&orders, &users);

        let mut cart = Cart::default();
        cart.add(&product("abyss", 10));
        let order = service
            .place_order(&mut cart, details(DeliveryMethod::Pickup), None)
            .await
            .unwrap();

        assert_eq!(order.shipping, Price::ZERO);
        assert_eq!(order.total, Price::from_dollars(10));
    }

    #[tokio::test]
    async fn test_validation_leaves_bag_intact() {
        let dir = tempfile::tempdir().unwrap();
        let orders = OrderStore::new(dir.path());
        let users = UserStore::new(dir.path());
        let service = CheckoutService::new(&orders, &users);

        let mut cart = three_item_cart();
        let mut bad = details(DeliveryMethod::Shipping);
        bad.phone = "   ".to_owned();

        let result = service.place_order(&mut cart, bad, None).await;
        assert!(matches!(result, Err(CheckoutError::MissingPhone)));
        assert_eq!(cart.item_count(), 3);
        assert!(orders.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_shipping_without_address_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let orders = OrderStore::new(dir.path());
        let users = UserStore::new(dir.path());
        let service = CheckoutService::new(&orders, &users);

        let mut cart = three_item_cart();
        let mut bad = details(DeliveryMethod::Shipping);
        bad.address = String::new();

        assert!(matches!(
            service.place_order(&mut cart, bad, None).await,
            Err(CheckoutError::MissingAddress)
        ));
    }

    #[tokio::test]
    async fn test_empty_bag_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let orders = OrderStore::new(dir.path());
        let users = UserStore::new(dir.path());
        let service = CheckoutService::new(&orders, &users);

        let mut cart = Cart::default();
        assert!(matches!(
            service
                .place_order(&mut cart, details(DeliveryMethod::Pickup), None)
                .await,
            Err(CheckoutError::EmptyBag)
        ));
    }

    #[tokio::test]
    async fn test_signed_in_checkout_mirrors_to_history() {
        let dir = tempfile::tempdir().unwrap();
        let orders = OrderStore::new(dir.path());
        let users = UserStore::new(dir.path());

        let auth = AuthService::new(&users);
        let account = auth
            .register("amina@example.com", "a decent password", "Amina")
            .await
            .unwrap();

        let service = CheckoutService::new(&orders, &users);
        let mut cart = three_item_cart();
        let order = service
            .place_order(
                &mut cart,
                details(DeliveryMethod::Pickup),
                Some(&account.email),
            )
            .await
            .unwrap();

        let record = users.get(&account.email).await.unwrap();
        assert_eq!(record.orders.len(), 1);
        assert_eq!(record.orders[0].id, order.id);
    }
}
