//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod size;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{CurrencyCode, MINOR_UNITS_PER_MAJOR, format_price, to_minor_units};
pub use size::Size;
