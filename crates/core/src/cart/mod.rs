//! Shopping cart state.
//!
//! A cart is an ordered list of [`LineItem`]s, unique by the composite key
//! `(product_id, size)`. New keys append; existing keys change in place, so
//! the order a shopper added things in survives every mutation.
//!
//! [`CartState`] holds the pure reducer logic. [`CartEngine`] wraps a state
//! with a [`CartStorage`] slot and persists after every mutation.

pub mod codec;
pub mod engine;
pub mod storage;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ProductRecord};
use crate::types::{ProductId, Size};

pub use codec::{DecodeError, encode, try_decode};
pub use engine::{CartEngine, persist, restore};
pub use storage::{CART_KEY, CartStorage, MemoryStorage, StorageError};

/// One (product, size) selection.
///
/// Serialized as `{"id": .., "size": .., "qty": ..}`. The long field names
/// `productId` and `quantity` are accepted when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id", alias = "productId")]
    pub product_id: ProductId,
    pub size: Size,
    /// Always at least 1 while the item is in a cart.
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: u32,
}

impl LineItem {
    fn is_key(&self, product_id: &ProductId, size: &Size) -> bool {
        &self.product_id == product_id && &self.size == size
    }
}

/// The full ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the item with the given composite key.
    #[must_use]
    pub fn get(&self, product_id: &ProductId, size: &Size) -> Option<&LineItem> {
        self.items.iter().find(|i| i.is_key(product_id, size))
    }

    fn position(&self, product_id: &ProductId, size: &Size) -> Option<usize> {
        self.items.iter().position(|i| i.is_key(product_id, size))
    }

    /// Add one unit of `(product_id, size)`.
    ///
    /// The product id is not checked against the catalog.
    pub fn add_item(&mut self, product_id: ProductId, size: Size) {
        if let Some(item) = self.items.iter_mut().find(|i| i.is_key(&product_id, &size)) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem {
                product_id,
                size,
                quantity: 1,
            });
        }
    }

    /// Change the quantity of an existing item by `delta`.
    ///
    /// Unknown keys are ignored. An item whose quantity would drop to zero or
    /// below is removed. Returns `true` if the cart changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, size: &Size, delta: i64) -> bool {
        let Some(idx) = self.position(product_id, size) else {
            return false;
        };
        let Some(item) = self.items.get_mut(idx) else {
            return false;
        };

        let next = i64::from(item.quantity).saturating_add(delta);
        if next <= 0 {
            self.items.remove(idx);
        } else {
            item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
        delta != 0
    }

    /// Remove the item with the given key. Returns `true` if one was removed.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &Size) -> bool {
        let before = self.items.len();
        self.items.retain(|i| !i.is_key(product_id, size));
        self.items.len() != before
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `quantity × price` in whole rupees.
    ///
    /// Items whose product is no longer in the catalog contribute nothing.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> u64 {
        self.items.iter().fold(0, |sum, item| {
            match catalog.get(&item.product_id) {
                Some(product) => {
                    sum.saturating_add(product.price.saturating_mul(u64::from(item.quantity)))
                }
                None => sum,
            }
        })
    }

    /// Items paired with their catalog record, skipping stale references.
    pub fn resolved<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a LineItem, &'a ProductRecord)> + 'a {
        self.items
            .iter()
            .filter_map(|item| catalog.get(&item.product_id).map(|p| (item, p)))
    }
}

impl From<Vec<LineItem>> for CartState {
    /// Build a state from items, merging repeated keys into the first
    /// occurrence and dropping zero quantities.
    fn from(items: Vec<LineItem>) -> Self {
        let mut state = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match state.items.iter_mut().find(|i| i.is_key(&item.product_id, &item.size)) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => state.items.push(item),
            }
        }
        state
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn size(s: &str) -> Size {
        Size::new(s)
    }

    fn line(product: &str, sz: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id: id(product),
            size: size(sz),
            quantity,
        }
    }

    #[test]
    fn test_add_same_key_twice_merges() {
        let catalog = Catalog::default();
        let mut cart = CartState::new();
        cart.add_item(id("ps91"), size("M"));
        cart.add_item(id("ps91"), size("M"));

        assert_eq!(cart.items(), [line("ps91", "M", 2)]);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.subtotal(&catalog), 7998);
    }

    #[test]
    fn test_different_sizes_are_different_lines() {
        let mut cart = CartState::new();
        cart.add_item(id("ps91"), size("M"));
        cart.add_item(id("ps91"), size("L"));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut cart = CartState::new();
        cart.add_item(id("ps91"), size("M"));
        cart.add_item(id("crossblk"), size("L"));

        assert!(cart.update_quantity(&id("ps91"), &size("M"), -1));
        assert_eq!(cart.items(), [line("crossblk", "L", 1)]);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_update_below_zero_removes_line() {
        let mut cart = CartState::from(vec![line("ps91", "M", 2)]);
        cart.update_quantity(&id("ps91"), &size("M"), -10);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_keeps_position() {
        let mut cart = CartState::from(vec![
            line("ps91", "M", 1),
            line("crossblk", "L", 1),
            line("holy", "S", 1),
        ]);
        cart.update_quantity(&id("crossblk"), &size("L"), 4);
        assert_eq!(
            cart.items(),
            [
                line("ps91", "M", 1),
                line("crossblk", "L", 5),
                line("holy", "S", 1)
            ]
        );
    }

    #[test]
    fn test_update_missing_key_is_noop() {
        let mut cart = CartState::from(vec![line("ps91", "M", 1)]);
        let before = cart.clone();
        assert!(!cart.update_quantity(&id("ps91"), &size("XL"), 1));
        assert!(!cart.update_quantity(&id("nope"), &size("M"), -1));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartState::from(vec![line("ps91", "M", 3), line("flag", "S", 1)]);
        assert!(cart.remove_item(&id("ps91"), &size("M")));
        let once = cart.clone();
        assert!(!cart.remove_item(&id("ps91"), &size("M")));
        assert_eq!(cart, once);
        assert_eq!(cart.items(), [line("flag", "S", 1)]);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::from(vec![line("ps91", "M", 3)]);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_unknown_product_counts_but_costs_nothing() {
        let catalog = Catalog::default();
        let mut cart = CartState::new();
        cart.add_item(id("unknownid"), size("M"));
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.subtotal(&catalog), 0);
        assert_eq!(cart.resolved(&catalog).count(), 0);
    }

    #[test]
    fn test_subtotal_mixes_known_and_stale_lines() {
        let catalog = Catalog::default();
        let cart = CartState::from(vec![
            line("ps91", "M", 2),
            line("retired", "L", 5),
            line("bread", "XL", 1),
        ]);
        assert_eq!(cart.subtotal(&catalog), 2 * 3999 + 3099);
        assert_eq!(cart.total_items(), 8);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = CartState::new();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.subtotal(&Catalog::default()), 0);
    }

    #[test]
    fn test_from_vec_merges_duplicates_and_drops_zero() {
        let cart = CartState::from(vec![
            line("ps91", "M", 1),
            line("flag", "S", 0),
            line("ps91", "M", 2),
        ]);
        assert_eq!(cart.items(), [line("ps91", "M", 3)]);
    }

    fn key_strategy() -> impl Strategy<Value = (String, String)> {
        (
            prop::sample::select(vec!["ps91", "crossblk", "holy", "ghost"]),
            prop::sample::select(vec!["S", "M", "L", "XL"]),
        )
            .prop_map(|(p, s)| (p.to_owned(), s.to_owned()))
    }

    proptest! {
        #[test]
        fn prop_add_counts_calls_and_distinct_keys(keys in prop::collection::vec(key_strategy(), 0..64)) {
            let mut cart = CartState::new();
            for (p, s) in &keys {
                cart.add_item(id(p), size(s));
            }
            let distinct: std::collections::HashSet<_> = keys.iter().collect();
            prop_assert_eq!(cart.total_items(), keys.len() as u64);
            prop_assert_eq!(cart.items().len(), distinct.len());
            prop_assert!(cart.items().iter().all(|i| i.quantity > 0));
        }

        #[test]
        fn prop_negating_quantity_removes_line(
            keys in prop::collection::vec(key_strategy(), 1..32),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut cart = CartState::new();
            for (p, s) in &keys {
                cart.add_item(id(p), size(s));
            }
            let target = pick.get(cart.items()).clone();
            cart.update_quantity(&target.product_id, &target.size, -i64::from(target.quantity));
            prop_assert!(cart.get(&target.product_id, &target.size).is_none());
        }
    }
}
