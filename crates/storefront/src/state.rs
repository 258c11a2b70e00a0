//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::{CatalogSource, HttpCatalog};
use crate::config::StorefrontConfig;
use crate::services::SharedStore;
use crate::services::auth::{AuthProvider, MockAuthProvider};
use crate::services::orders::{MockOrderProvider, OrderProvider};
use crate::storage::{FileStorage, LocalStorage, StorageError};
use crate::store::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// store and its collaborators.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: SharedStore,
    catalog: Arc<dyn CatalogSource>,
    auth: Arc<dyn AuthProvider>,
    orders: Arc<dyn OrderProvider>,
}

impl AppState {
    /// Create the production state: HTTP catalog, file storage under the
    /// data directory, and the mock auth and order providers.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file exists but cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(config.storage_path())?;
        let catalog = HttpCatalog::new(&config.catalog);
        let auth = MockAuthProvider::new(config.auth_delay);

        Ok(Self::from_parts(
            config,
            Arc::new(storage),
            Arc::new(catalog),
            Arc::new(auth),
            Arc::new(MockOrderProvider),
        ))
    }

    /// Assemble state from explicit collaborators.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        storage: Arc<dyn LocalStorage>,
        catalog: Arc<dyn CatalogSource>,
        auth: Arc<dyn AuthProvider>,
        orders: Arc<dyn OrderProvider>,
    ) -> Self {
        let store = Arc::new(RwLock::new(Store::hydrate(storage)));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog,
                auth,
                orders,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the shared application store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    /// Get the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogSource {
        self.inner.catalog.as_ref()
    }

    /// Get the authentication provider.
    #[must_use]
    pub fn auth(&self) -> &dyn AuthProvider {
        self.inner.auth.as_ref()
    }

    /// Get the order provider.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderProvider {
        self.inner.orders.as_ref()
    }
}
