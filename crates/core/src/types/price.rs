//! Prices and currency units.
//!
//! Every amount in the catalog and the cart is an integer count of whole
//! rupees. The payment widget wants paise, so the one place that scales an
//! amount is [`to_minor_units`], called at the checkout boundary.

use serde::{Deserialize, Serialize};

/// Minor units (paise) per major unit (rupee).
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// Convert a whole-unit amount into the currency's smallest sub-unit.
///
/// Saturates at `u64::MAX` instead of wrapping.
///
/// ```
/// use faithwear_core::to_minor_units;
///
/// assert_eq!(to_minor_units(3999), 399_900);
/// assert_eq!(to_minor_units(0), 0);
/// ```
#[must_use]
pub const fn to_minor_units(amount: u64) -> u64 {
    amount.saturating_mul(MINOR_UNITS_PER_MAJOR)
}

/// Format a whole-unit amount for display, e.g. `₹3,999`.
///
/// ```
/// use faithwear_core::format_price;
///
/// assert_eq!(format_price(3999), "₹3,999");
/// assert_eq!(format_price(7), "₹7");
/// ```
#[must_use]
pub fn format_price(amount: u64) -> String {
    format!("{}{}", CurrencyCode::INR.symbol(), group_thousands(amount))
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// ISO 4217 currency codes accepted by the payment widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
        }
    }

    /// ISO code as sent to the payment widget.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
        }
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}
