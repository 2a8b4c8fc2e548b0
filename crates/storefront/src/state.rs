//! Application state shared across handlers.

use std::sync::Arc;

use faithwear_core::cart::{CartEngine, CartStorage, StorageError};
use faithwear_core::{Catalog, PaymentSettings};
use tokio::sync::{Mutex, MutexGuard};

use crate::config::StorefrontConfig;
use crate::storage::FileStorage;

/// Storage backend behind the shared cart.
pub type DynStorage = Box<dyn CartStorage + Send>;

/// The one cart this storefront serves.
pub type SharedCart = CartEngine<DynStorage>;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart sits behind an async mutex so that
/// every mutation, and the write that follows it, completes before the next
/// one starts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    payment: PaymentSettings,
    cart: Mutex<SharedCart>,
}

impl AppState {
    /// Create application state with the cart stored in
    /// `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir)?;
        Ok(Self::new(config, Catalog::default(), Box::new(storage)))
    }

    /// Create application state over an explicit catalog and storage.
    ///
    /// The cart is restored from `storage` immediately.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: DynStorage) -> Self {
        let cart = CartEngine::restore(storage);
        tracing::info!(
            lines = cart.items().len(),
            items = cart.total_items(),
            "cart restored"
        );
        let payment = config.payment_settings();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                payment,
                cart: Mutex::new(cart),
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

    /// Payment widget settings.
    #[must_use]
    pub fn payment_settings(&self) -> &PaymentSettings {
        &self.inner.payment
    }

    /// Lock the cart for reading or mutation.
    ///
    /// Mutations persist synchronously through the storage backend while
    /// the guard is held. For [`FileStorage`] that is a small blocking write.
    pub async fn cart(&self) -> MutexGuard<'_, SharedCart> {
        self.inner.cart.lock().await
    }
}
