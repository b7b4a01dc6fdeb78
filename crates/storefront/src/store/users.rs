//! Customer account store backed by `users.json`.

use std::path::{Path, PathBuf};

use sura_core::Email;
use tokio::sync::Mutex;

use super::{RepositoryError, read_collection, write_collection};
use crate::models::{Order, UserRecord};

/// Repository over the flat `users.json` file, keyed by normalized email.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserStore {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("users.json"),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the email is already taken.
    pub async fn create(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut users: Vec<UserRecord> = read_collection(&self.path).await?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "account already exists: {}",
                user.email
            )));
        }
        users.push(user.clone());
        write_collection(&self.path, &users).await
    }

    /// Look up an account by email.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no account has that email.
    pub async fn get(&self, email: &Email) -> Result<UserRecord, RepositoryError> {
        let users: Vec<UserRecord> = read_collection(&self.path).await?;
        users
            .into_iter()
            .find(|u| &u.email == email)
            .ok_or(RepositoryError::NotFound)
    }

    /// Load every account.
    pub async fn all(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        read_collection(&self.path).await
    }

    /// Append an order to the account's embedded history.
    pub async fn append_order(
        &self,
        email: &Email,
        order: Order,
    ) -> Result<(), RepositoryError> {
        self.update(email, |user| user.orders.push(order)).await
    }

    /// Flip the newsletter opt-in flag.
    pub async fn set_newsletter(
        &self,
        email: &Email,
        subscribed: bool,
    ) -> Result<(), RepositoryError> {
        self.update(email, |user| user.newsletter = subscribed)
            .await
    }

    async fn update(
        &self,
        email: &Email,
        mutate: impl FnOnce(&mut UserRecord),
    ) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut users: Vec<UserRecord> = read_collection(&self.path).await?;
        let user = users
            .iter_mut()
            .find(|u| &u.email == email)
            .ok_or(RepositoryError::NotFound)?;
        mutate(user);
        write_collection(&self.path, &users).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sura_core::{DeliveryMethod, OrderId, OrderStatus, Price};

    use super::*;
    use crate::models::Customer;

    fn user(email: &str) -> UserRecord {
        UserRecord {
            email: email.parse().unwrap(),
            password_hash: "$argon2id$fake".to_owned(),
            display_name: "Amina".to_owned(),
            newsletter: false,
            created_at: Utc::now(),
            orders: Vec::new(),
        }
    }

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
            lines: Vec::new(),
            subtotal: Price::ZERO,
            shipping: Price::ZERO,
            total: Price::ZERO,
            status: OrderStatus::PendingPayment,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());

        store.create(&user("amina@example.com")).await.unwrap();
        let found = store.get(&"amina@example.com".parse().unwrap()).await;
        assert_eq!(found.unwrap().display_name, "Amina");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());

        store.create(&user("amina@example.com")).await.unwrap();
        // Same address, different case: normalization makes it a duplicate
        assert!(matches!(
            store.create(&user("AMINA@example.com")).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_append_order_to_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());
        let email: Email = "amina@example.com".parse().unwrap();

        store.create(&user("amina@example.com")).await.unwrap();
        store.append_order(&email, order("SURA-1")).await.unwrap();
        store.append_order(&email, order("SURA-2")).await.unwrap();

        let found = store.get(&email).await.unwrap();
        assert_eq!(found.orders.len(), 2);
        assert_eq!(found.orders[1].id.as_str(), "SURA-2");
    }

    #[tokio::test]
    async fn test_set_newsletter() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());
        let email: Email = "amina@example.com".parse().unwrap();

        store.create(&user("amina@example.com")).await.unwrap();
        store.set_newsletter(&email, true).await.unwrap();
        assert!(store.get(&email).await.unwrap().newsletter);
    }
}
