//! The durable slot a cart is persisted to.
//!
//! Storage is a synchronous string key-value interface. The cart only ever
//! uses one key, [`CART_KEY`].

use std::collections::HashMap;

use thiserror::Error;

/// Key the cart is stored under.
pub const CART_KEY: &str = "faithwear_cart_v2";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A synchronous key-value store for serialized values.
pub trait CartStorage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be written.
    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).store(key, value)
    }
}

/// In-process storage, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one value.
    #[must_use]
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_owned(), value.into());
        storage
    }

    /// Peek at a stored value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Drop a stored value, as a user wiping site data would.
    pub fn wipe(&mut self, key: &str) {
        self.values.remove(key);
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
