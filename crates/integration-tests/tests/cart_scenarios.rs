//! Cart engine scenarios over real file storage.
//!
//! Each test owns a temporary data directory; "restarting" means dropping
//! the engine and restoring a fresh one from the same directory.

#![allow(clippy::unwrap_used)]

use std::fs;

use faithwear_core::{CART_KEY, CartEngine, CartStorage, Catalog, ProductId, Size};
use faithwear_storefront::FileStorage;

fn open(dir: &tempfile::TempDir) -> CartEngine<FileStorage> {
    CartEngine::restore(FileStorage::open(dir.path()).unwrap())
}

fn cart_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join(format!("{CART_KEY}.json"))
}

#[test]
fn test_repeat_add_merges_into_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::default();
    let mut cart = open(&dir);

    cart.add_item("ps91", "M");
    cart.add_item("ps91", "M");

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.subtotal(&catalog), 7998);
}

#[test]
fn test_decrement_to_zero_removes_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = open(&dir);

    cart.add_item("ps91", "M");
    cart.add_item("crossblk", "L");
    cart.update_quantity(&ProductId::new("ps91"), &Size::new("M"), -1);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].product_id, "crossblk");
    assert_eq!(cart.items()[0].size, "L");
    assert_eq!(cart.total_items(), 1);
}

#[test]
fn test_unknown_product_counts_but_costs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = open(&dir);

    cart.add_item("unknownid", "M");

    assert_eq!(cart.total_items(), 1);
    assert_eq!(cart.subtotal(&Catalog::default()), 0);
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut cart = open(&dir);
        cart.add_item("ps91", "M");
        cart.add_item("holy", "XL");
        cart.add_item("ps91", "M");
        cart.update_quantity(&ProductId::new("holy"), &Size::new("XL"), 3);
    }

    let cart = open(&dir);
    let lines: Vec<_> = cart
        .items()
        .iter()
        .map(|item| (item.product_id.as_str(), item.size.as_str(), item.quantity))
        .collect();
    assert_eq!(lines, [("ps91", "M", 2), ("holy", "XL", 4)]);
}

#[test]
fn test_clear_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut cart = open(&dir);
        cart.add_item("ps91", "M");
        cart.clear();
    }

    let cart = open(&dir);
    assert!(cart.state().is_empty());
    assert_eq!(fs::read_to_string(cart_file(&dir)).unwrap(), "[]");
}

#[test]
fn test_persisted_format_is_compatible() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = open(&dir);
    cart.add_item("ps91", "L");

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(cart_file(&dir)).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!([{ "id": "ps91", "size": "L", "qty": 1 }]));
}

#[test]
fn test_legacy_field_names_restore() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        cart_file(&dir),
        r#"[{"productId":"ps91","size":"S","quantity":3}]"#,
    )
    .unwrap();

    let cart = open(&dir);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.items()[0].size, "S");
}

#[test]
fn test_corrupt_file_restores_empty() {
    for raw in ["{not json", r#"{"id":"ps91"}"#, r#"[{"id":"ps91","size":"M","qty":0}]"#] {
        let dir = tempfile::tempdir().unwrap();
        fs::write(cart_file(&dir), raw).unwrap();

        let cart = open(&dir);
        assert!(cart.state().is_empty(), "expected empty cart for {raw}");
    }
}

#[test]
fn test_corrupt_file_is_replaced_on_next_change() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(cart_file(&dir), "garbage").unwrap();

    let mut cart = open(&dir);
    cart.add_item("flag", "M");

    let storage = FileStorage::open(dir.path()).unwrap();
    let raw = storage.load(CART_KEY).unwrap().unwrap();
    assert!(raw.contains("\"flag\""));
}

#[test]
fn test_noop_changes_do_not_touch_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = open(&dir);

    cart.update_quantity(&ProductId::new("ps91"), &Size::new("M"), 5);
    cart.remove_item(&ProductId::new("ps91"), &Size::new("M"));

    assert!(!cart_file(&dir).exists());
}
