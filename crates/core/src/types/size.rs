//! Garment sizes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A garment size as selected in the storefront.
///
/// Forms only offer [`Size::KNOWN`], but the cart keeps whatever text it was
/// given: a persisted cart with an unusual size still restores and still
/// forms its own line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(String);

impl Size {
    /// Sizes offered by the size pickers, in display order.
    pub const KNOWN: [&'static str; 4] = ["S", "M", "L", "XL"];

    /// Size used when the caller does not pick one.
    pub const DEFAULT: &'static str = "M";

    /// Create a size from free-form text.
    #[must_use]
    pub fn new(size: impl Into<String>) -> Self {
        Self(size.into())
    }

    /// Get the size as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the sizes offered by the size pickers.
    #[must_use]
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl Default for Size {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Size {
    fn from(size: &str) -> Self {
        Self(size.to_owned())
    }
}

impl From<String> for Size {
    fn from(size: String) -> Self {
        Self(size)
    }
}

impl PartialEq<&str> for Size {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
