//! Checkout: order summaries and payment widget requests.
//!
//! The storefront does not talk to the payment provider itself. It builds a
//! [`PaymentRequest`] (the options object the hosted Razorpay widget is
//! opened with) and the browser takes it from there. Cart amounts are whole
//! rupees; the request amount is paise, converted with
//! [`to_minor_units`](crate::types::to_minor_units).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartState;
use crate::catalog::Catalog;
use crate::types::{CurrencyCode, Email, EmailError, ProductId, Size, format_price, to_minor_units};

/// Errors that stop a checkout before the payment widget opens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no line items.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// The cart only references products that are no longer sold.
    #[error("Nothing in your cart is available for purchase.")]
    NothingPayable,

    /// The contact email could not be parsed.
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// One resolved line of an order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub verse: String,
    pub size: Size,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

impl fmt::Display for SummaryLine {
    /// `2 × Faith Over Fear – Psalm 91:2 (M) — ₹7,998`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} × {} ({}) — {}",
            self.quantity,
            self.name,
            self.size,
            format_price(self.line_total)
        )
    }
}

/// Cart contents resolved against the catalog, with derived totals.
///
/// Lines whose product is missing from the catalog are left out of `lines`
/// but still count toward `total_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total_items: u64,
    pub subtotal: u64,
}

impl OrderSummary {
    #[must_use]
    pub fn new(state: &CartState, catalog: &Catalog) -> Self {
        let lines = state
            .resolved(catalog)
            .map(|(item, product)| SummaryLine {
                product_id: item.product_id.clone(),
                name: product.name.clone(),
                image: product.image.clone(),
                verse: product.verse.clone(),
                size: item.size.clone(),
                quantity: item.quantity,
                unit_price: product.price,
                line_total: product.price.saturating_mul(u64::from(item.quantity)),
            })
            .collect();

        Self {
            lines,
            total_items: state.total_items(),
            subtotal: state.subtotal(catalog),
        }
    }
}

/// Contact and delivery details from the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShippingDetails {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub address: Option<String>,
}

impl ShippingDetails {
    /// Build details from raw form fields.
    ///
    /// Blank fields are treated as absent. Returns `Ok(None)` when every
    /// field is blank.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidEmail`] if a non-blank email does not
    /// parse.
    pub fn from_form(name: &str, email: &str, address: &str) -> Result<Option<Self>, CheckoutError> {
        let non_blank = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        };

        let email = non_blank(email).map(|e| Email::parse(&e)).transpose()?;
        let details = Self {
            name: non_blank(name),
            email,
            address: non_blank(address),
        };

        if details == Self::default() {
            Ok(None)
        } else {
            Ok(Some(details))
        }
    }
}

/// The subtotal a checkout would charge, in whole rupees.
///
/// Callers check this before looking at shopper details, so an empty cart is
/// reported as such whatever else the form holds.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines, and
/// [`CheckoutError::NothingPayable`] if its subtotal is zero.
pub fn payable_total(state: &CartState, catalog: &Catalog) -> Result<u64, CheckoutError> {
    if state.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    match state.subtotal(catalog) {
        0 => Err(CheckoutError::NothingPayable),
        subtotal => Ok(subtotal),
    }
}

/// Store-level settings for the payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSettings {
    /// Public key id (`rzp_live_…` / `rzp_test_…`).
    pub key_id: String,
    pub store_name: String,
    pub description: String,
    pub theme_color: String,
}

impl PaymentSettings {
    pub const DEFAULT_DESCRIPTION: &'static str = "Hoodie order";
    pub const DEFAULT_THEME_COLOR: &'static str = "#000000";

    #[must_use]
    pub fn new(key_id: impl Into<String>, store_name: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            store_name: store_name.into(),
            description: Self::DEFAULT_DESCRIPTION.to_owned(),
            theme_color: Self::DEFAULT_THEME_COLOR.to_owned(),
        }
    }
}

/// Prefilled contact fields shown by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub color: String,
}

/// Options object handed to the hosted payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub key: String,
    /// Amount in paise.
    pub amount: u64,
    pub currency: CurrencyCode,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefill: Option<Prefill>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub notes: BTreeMap<String, String>,
    pub theme: Theme,
}

impl PaymentRequest {
    /// Build the widget options for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines, and
    /// [`CheckoutError::NothingPayable`] if its subtotal is zero.
    pub fn for_cart(
        state: &CartState,
        catalog: &Catalog,
        settings: &PaymentSettings,
        shipping: Option<&ShippingDetails>,
    ) -> Result<Self, CheckoutError> {
        let subtotal = payable_total(state, catalog)?;

        let prefill = shipping
            .filter(|s| s.name.is_some() || s.email.is_some())
            .map(|s| Prefill {
                name: s.name.clone(),
                email: s.email.as_ref().map(ToString::to_string),
            });

        let mut notes = BTreeMap::new();
        if let Some(address) = shipping.and_then(|s| s.address.as_ref()) {
            notes.insert("shipping_address".to_owned(), address.clone());
        }

        Ok(Self {
            key: settings.key_id.clone(),
            amount: to_minor_units(subtotal),
            currency: CurrencyCode::INR,
            name: settings.store_name.clone(),
            description: settings.description.clone(),
            prefill,
            notes,
            theme: Theme {
                color: settings.theme_color.clone(),
            },
        })
    }
}
