//! Cart store behaviour across reloads and storage backends.

use shopfront_cart::prelude::*;
use shopfront_storage::{FileStorage, MemoryStorage, Storage};

fn product(id: &str, cents: i64) -> Product {
    Product::new(id, format!("Product {id}"), Price::from_cents(cents))
}

fn ids(cart: &Cart) -> Vec<String> {
    cart.iter().map(|i| i.product_id.to_string()).collect()
}

#[test]
fn add_remove_update_scenario() {
    let mut store = CartStore::open(MemoryStorage::new());
    let a = product("A", 1000);

    let cart = store.add(&a, 2);
    assert_eq!(cart.total(), Price::from_decimal(20.0));
    assert_eq!(cart.item_count(), 2);

    let cart = store.add(&a, 1);
    assert_eq!(cart.quantity_of(&a.id), 3);
    assert_eq!(cart.total(), Price::from_decimal(30.0));

    let cart = store.update_quantity(&a.id, 1);
    assert_eq!(cart.total(), Price::from_decimal(10.0));

    let cart = store.remove(&a.id);
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Price::zero());
}

#[test]
fn distinct_adds_sum_quantities_per_id() {
    let mut store = CartStore::open(MemoryStorage::new());
    let adds = [("a", 2), ("b", 1), ("a", 3), ("c", 4), ("b", 5)];
    for (id, qty) in adds {
        store.add(&product(id, 100), qty);
    }

    let cart = store.cart();
    assert_eq!(ids(cart), vec!["a", "b", "c"]);
    assert_eq!(cart.quantity_of(&"a".into()), 5);
    assert_eq!(cart.quantity_of(&"b".into()), 6);
    assert_eq!(cart.quantity_of(&"c".into()), 4);
    assert_eq!(cart.item_count(), 15);
    assert_eq!(cart.total().cents(), 1500);
}

#[test]
fn remove_absent_leaves_cart_unchanged() {
    let mut store = CartStore::open(MemoryStorage::new());
    store.add(&product("a", 100), 2);
    store.add(&product("b", 100), 1);
    let before = store.cart().clone();

    let after = store.remove(&"zzz".into());
    assert_eq!(after, before);
    assert!(!after.contains(&"zzz".into()));
}

#[test]
fn update_changes_only_target_item() {
    let mut store = CartStore::open(MemoryStorage::new());
    store.add(&product("a", 100), 2);
    store.add(&product("b", 300), 1);

    let cart = store.update_quantity(&"b".into(), 7);
    assert_eq!(ids(&cart), vec!["a", "b"]);
    assert_eq!(cart.quantity_of(&"a".into()), 2);
    assert_eq!(cart.quantity_of(&"b".into()), 7);

    let unchanged = store.update_quantity(&"b".into(), 0);
    assert_eq!(unchanged, cart);
}

#[test]
fn clear_yields_empty_cart() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(storage.clone());
    store.add(&product("a", 100), 2);

    let cart = store.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
    assert!(CartStore::open(storage).cart().is_empty());
}

#[test]
fn load_reproduces_last_snapshot() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(storage.clone());

    store.add(&product("x", 250).with_category("Mugs"), 1);
    store.add(&product("y", 999), 3);
    let last = store.update_quantity(&"x".into(), 4);

    assert_eq!(store.load(), last);
    assert_eq!(CartStore::open(storage).cart(), &last);
}

#[test]
fn catalog_payload_survives_reload() {
    let lamp: Product = serde_json::from_str(
        r#"{
            "_id": "p1",
            "name": "Desk Lamp",
            "price": 24.5,
            "stock": 12,
            "quantity": 50,
            "productId": "elsewhere",
            "images": [{"url": "https://cdn.example.com/lamp.jpg"}],
            "category": {"_id": "c1", "name": "Lighting"},
            "description": "Warm white LED",
            "rating": {"rate": 4.2, "count": 31}
        }"#,
    )
    .unwrap();

    let storage = MemoryStorage::new();
    let mut store = CartStore::open(storage.clone());
    store.add(&lamp, 2);
    let last = store.add(&product("mug", 899), 1);
    assert!(store.last_persist_ok());

    let reloaded = CartStore::open(storage).cart().clone();
    assert_eq!(reloaded, last);

    let line = reloaded.get(&"p1".into()).unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.category.as_deref(), Some("Lighting"));
    assert_eq!(line.image.as_deref(), Some("https://cdn.example.com/lamp.jpg"));
    assert!(line.extra.contains_key("rating"));
    assert!(!line.extra.contains_key("quantity"));
}

#[test]
fn reads_cart_saved_with_spread_product_records() {
    let storage = MemoryStorage::new();
    storage
        .set(
            "cart_items",
            r#"[{"_id": "abc", "id": "abc", "name": "Lamp", "price": 10, "quantity": 2,
                 "category": {"name": "Lighting"}}]"#,
        )
        .unwrap();

    let store = CartStore::open(storage);
    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart().quantity_of(&"abc".into()), 2);
    assert_eq!(store.cart().total(), Price::from_decimal(20.0));
}

#[test]
fn corrupt_slot_loads_empty() {
    for raw in ["{not json", "42", r#"{"items": []}"#, r#"[{"productId": "a"}]"#] {
        let storage = MemoryStorage::new();
        storage.set("cart_items", raw).unwrap();

        let mut store = CartStore::open(storage);
        assert!(store.cart().is_empty(), "{raw:?} should load as empty");

        // The store keeps working and overwrites the bad value
        store.add_one(&product("a", 100));
        assert_eq!(store.load().len(), 1);
    }
}

#[test]
fn last_writer_wins_between_tabs() {
    let storage = MemoryStorage::new();
    let mut tab_a = CartStore::open(storage.clone());
    let mut tab_b = CartStore::open(storage.clone());

    tab_a.add(&product("a", 100), 1);
    tab_b.add(&product("b", 100), 1);

    // Each tab keeps its own snapshot
    assert_eq!(ids(tab_a.cart()), vec!["a"]);
    assert_eq!(ids(tab_b.cart()), vec!["b"]);

    // A reload sees whichever wrote last
    assert_eq!(ids(&CartStore::open(storage).cart().clone()), vec!["b"]);
}

#[test]
fn quota_failure_is_not_fatal() {
    let storage = MemoryStorage::with_quota(200);
    let mut store = CartStore::open(storage.clone());

    store.add(&product("a", 100), 1);
    assert!(store.last_persist_ok());
    let persisted = storage.get("cart_items").unwrap();

    let long_name = Product::new("b", "x".repeat(500), Price::from_cents(100));
    let cart = store.add(&long_name, 1);
    assert_eq!(cart.len(), 2);
    assert!(!store.last_persist_ok());

    // Storage still holds the previous snapshot
    assert_eq!(storage.get("cart_items").unwrap(), persisted);
}

#[test]
fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = CartStore::open(FileStorage::open(dir.path()).unwrap());
        store.add(&product("lamp", 2450).with_stock(3), 2);
        store.add(&product("mug", 899), 1);
    }

    let mut store = CartStore::open(FileStorage::open(dir.path()).unwrap());
    let cart = store.cart();
    assert_eq!(ids(cart), vec!["lamp", "mug"]);
    assert_eq!(cart.get(&"lamp".into()).unwrap().stock, Some(3));
    assert_eq!(OrderSummary::for_cart(cart).total.display(), "$57.99");

    store.clear();
    let storage = store.into_storage();
    assert_eq!(storage.get("cart_items").unwrap().as_deref(), Some("[]"));
    assert!(dir.path().join("cart_items").is_file());
}

#[test]
fn stock_check_then_add() {
    let mut store = CartStore::open(MemoryStorage::new());
    let lamp = product("lamp", 2450).with_stock(3);

    assert!(StockCheck::new(store.cart(), &lamp).check_add(2).is_ok());
    store.add(&lamp, 2);

    let check = StockCheck::new(store.cart(), &lamp);
    assert_eq!(check.level(), Some(StockLevel::Low(1)));
    assert!(check.check_add(2).is_err());

    // The store itself does not enforce stock
    let cart = store.add(&lamp, 5);
    assert_eq!(cart.quantity_of(&lamp.id), 7);
}
