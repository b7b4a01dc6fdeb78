//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::content::ContentStore;
use crate::store::{OrderStore, UserStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog, content, and JSON stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
    orders: OrderStore,
    users: UserStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, content: ContentStore) -> Self {
        let orders = OrderStore::new(&config.data_dir);
        let users = UserStore::new(&config.data_dir);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
                orders,
                users,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the markdown page store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }
}
