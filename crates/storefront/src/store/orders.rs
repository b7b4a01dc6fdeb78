//! Append-only order store backed by `orders.json`.

use std::path::{Path, PathBuf};

use sura_core::OrderId;
use tokio::sync::Mutex;

use super::{RepositoryError, read_collection, write_collection};
use crate::models::Order;

/// Repository over the flat `orders.json` file.
#[derive(Debug)]
pub struct OrderStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl OrderStore {
    /// Create a store rooted at `data_dir`. The file is created lazily on
    /// the first append.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("orders.json"),
            write_lock: Mutex::new(()),
        }
    }

    /// Append a newly placed order.
    pub async fn append(&self, order: &Order) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut orders: Vec<Order> = read_collection(&self.path).await?;
        orders.push(order.clone());
        write_collection(&self.path, &orders).await
    }

    /// Load every order, oldest first.
    pub async fn all(&self) -> Result<Vec<Order>, RepositoryError> {
        read_collection(&self.path).await
    }

    /// Fetch a single order by id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no order has that id.
    pub async fn get(&self, id: &OrderId) -> Result<Order, RepositoryError> {
        let orders: Vec<Order> = read_collection(&self.path).await?;
        orders
            .into_iter()
            .find(|o| &o.id == id)
            .ok_or(RepositoryError::NotFound)
    }

    /// The most recent `limit` orders, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.all().await?;
        orders.reverse();
        orders.truncate(limit);
        Ok(orders)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sura_core::{DeliveryMethod, OrderStatus, Price, ProductId};

    use super::*;
    use crate::models::{Customer, OrderLine};

    fn order(id: &str) -> Order {
        Order {
            id: OrderId::new(id),
            placed_at: Utc::now(),
            customer: Customer {
                name: "Amina".to_owned(),
                phone: "+1-555-0100".to_owned(),
                email: None,
            },
            delivery: DeliveryMethod::Pickup,
            address: None,
            notes: None,
            payment_method: None,
            lines: vec![OrderLine {
                product_id: ProductId::new("abyss"),
                name: "Abyss".to_owned(),
                unit_price: Price::from_dollars(10),
                quantity: 1,
            }],
            subtotal: Price::from_dollars(10),
            shipping: Price::ZERO,
            total: Price::from_dollars(10),
            status: OrderStatus::PendingPayment,
        }
    }

    #[tokio::test]
    async fn test_append_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path());

        store.append(&order("SURA-1")).await.unwrap();
        store.append(&order("SURA-2")).await.unwrap();

        let found = store.get(&OrderId::new("SURA-2")).await.unwrap();
        assert_eq!(found.id.as_str(), "SURA-2");
        assert!(matches!(
            store.get(&OrderId::new("SURA-9")).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path());
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path());
        for i in 1..=3 {
            store.append(&order(&format!("SURA-{i}"))).await.unwrap();
        }

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id.as_str(), "SURA-3");
        assert_eq!(recent[1].id.as_str(), "SURA-2");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("orders.json"), b"not json")
            .await
            .unwrap();
        let store = OrderStore::new(dir.path());
        assert!(matches!(
            store.all().await,
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
