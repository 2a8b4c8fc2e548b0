//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;

use faithwear_core::{CheckoutError, StorageError};
use faithwear_storefront::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The cart file could not be read or written.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout refused the cart or the shopper details.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Bad configuration value (e.g. a placeholder key id).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid command argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the payment options failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
