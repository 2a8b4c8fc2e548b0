//! Cart engine: a [`CartState`] bound to a storage slot.
//!
//! The engine restores once when it is created and writes the full cart back
//! after every mutation. Neither direction ever fails the caller: a cart that
//! cannot be read starts empty, and a cart that cannot be written is logged
//! and kept in memory.

use tracing::{debug, error, info, warn};

use super::codec::{self, DecodeError};
use super::storage::{CART_KEY, CartStorage, StorageError};
use super::{CartState, LineItem};
use crate::catalog::Catalog;
use crate::types::{ProductId, Size};

/// Why a restore fell back to an empty cart.
#[derive(Debug, thiserror::Error)]
enum RestoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Read the cart from `storage`.
///
/// Any read error, missing value, or undecodable value yields an empty cart.
pub fn restore<S: CartStorage + ?Sized>(storage: &S) -> CartState {
    match try_restore(storage) {
        Ok(Some(state)) => {
            debug!(lines = state.items().len(), "restored cart");
            state
        }
        Ok(None) => CartState::new(),
        Err(e) => {
            warn!(error = %e, "discarding unreadable cart");
            CartState::new()
        }
    }
}

fn try_restore<S: CartStorage + ?Sized>(storage: &S) -> Result<Option<CartState>, RestoreError> {
    let Some(raw) = storage.load(CART_KEY)? else {
        return Ok(None);
    };
    Ok(Some(codec::try_decode(&raw)?))
}

/// Write the whole cart to `storage`, replacing any previous value.
///
/// Failures are logged and otherwise ignored.
pub fn persist<S: CartStorage + ?Sized>(storage: &mut S, state: &CartState) {
    if let Err(e) = storage.store(CART_KEY, &codec::encode(state)) {
        error!(error = %e, "failed to persist cart");
    }
}

/// A cart that saves itself after every change.
#[derive(Debug)]
pub struct CartEngine<S> {
    storage: S,
    state: CartState,
}

impl<S: CartStorage> CartEngine<S> {
    /// Create an engine, restoring whatever cart `storage` holds.
    #[must_use]
    pub fn restore(storage: S) -> Self {
        let state = restore(&storage);
        Self { storage, state }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of `(product_id, size)`.
    pub fn add_item(&mut self, product_id: impl Into<ProductId>, size: impl Into<Size>) {
        let product_id = product_id.into();
        let size = size.into();
        info!(%product_id, %size, "add to cart");
        self.state.add_item(product_id, size);
        self.persist();
    }

    /// Change the quantity of an existing item; see [`CartState::update_quantity`].
    pub fn update_quantity(&mut self, product_id: &ProductId, size: &Size, delta: i64) {
        if self.state.update_quantity(product_id, size, delta) {
            info!(%product_id, %size, delta, "updated cart quantity");
            self.persist();
        }
    }

    /// Remove an item if present.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &Size) {
        if self.state.remove_item(product_id, size) {
            info!(%product_id, %size, "removed from cart");
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        info!("cleared cart");
        self.state.clear();
        self.persist();
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> u64 {
        self.state.subtotal(catalog)
    }

    fn persist(&mut self) {
        persist(&mut self.storage, &self.state);
    }
}
