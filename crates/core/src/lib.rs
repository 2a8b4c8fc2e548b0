//! FaithWear Core - catalog, cart engine and checkout types.
//!
//! This crate is shared by:
//! - `storefront` - the HTTP storefront (axum + askama)
//! - `cli` - the `fw-cli` terminal front end
//!
//! # Architecture
//!
//! The core crate performs no I/O. Cart persistence goes through the
//! [`CartStorage`] trait so that callers decide where the cart lives (a file
//! slot on disk, an in-memory map in tests).
//!
//! # Modules
//!
//! - [`types`] - Newtypes for product ids, sizes, prices and email addresses
//! - [`catalog`] - The fixed product list and collection browsing
//! - [`cart`] - Cart state, the persisted cart engine and its wire codec
//! - [`checkout`] - Order summaries and payment widget requests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod types;

pub use cart::{
    CART_KEY, CartEngine, CartState, CartStorage, LineItem, MemoryStorage, StorageError,
};
pub use catalog::{Catalog, CollectionQuery, ProductRecord, SortOrder};
pub use checkout::{
    CheckoutError, OrderSummary, PaymentRequest, PaymentSettings, ShippingDetails, SummaryLine,
    payable_total,
};
pub use types::*;
