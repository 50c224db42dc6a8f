//! Persistent cart store.

use shopfront_storage::{Slot, Storage};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::config::CartConfig;
use crate::ids::ProductId;

/// Owner of the current cart, persisted to a key-value [`Storage`].
///
/// Every accepted mutation rewrites the whole cart under one key. Writes are
/// best effort: when the backend refuses a write the failure is logged, the
/// in-memory cart stays authoritative, and the call still returns the new
/// snapshot. Unreadable stored data loads as an empty cart.
///
/// # Example
///
/// ```rust
/// use shopfront_cart::prelude::*;
/// use shopfront_storage::MemoryStorage;
///
/// let mut store = CartStore::open(MemoryStorage::new());
/// let mug = Product::new("mug", "Mug", Price::from_cents(1000));
///
/// store.add(&mug, 2);
/// let cart = store.add_one(&mug);
/// assert_eq!(cart.item_count(), 3);
/// assert_eq!(cart.total().cents(), 3000);
/// ```
pub struct CartStore<S> {
    storage: S,
    slot: Slot<Cart>,
    cart: Cart,
    last_persist_ok: bool,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart stored under the default key.
    pub fn open(storage: S) -> Self {
        Self::with_config(storage, &CartConfig::default())
    }

    /// Open the cart stored under the configured key.
    pub fn with_config(storage: S, config: &CartConfig) -> Self {
        let mut store = Self {
            storage,
            slot: Slot::new(config.storage_key.clone()),
            cart: Cart::new(),
            last_persist_ok: true,
        };
        store.load();
        store
    }

    /// Re-read the persisted cart, replacing the in-memory snapshot.
    ///
    /// A missing or unreadable value yields an empty cart.
    pub fn load(&mut self) -> Cart {
        self.cart = match self.slot.read(&self.storage) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = self.slot.key(), error = %e, "discarding unreadable cart");
                Cart::new()
            }
        };
        self.cart.clone()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing line if the product is already present.
    /// Stock is not checked here; see [`crate::stock::StockCheck`].
    /// A quantity below 1 is ignored and nothing is written.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Cart {
        if !self.cart.add(product, quantity) {
            tracing::debug!(product_id = %product.id, quantity, "ignoring add with quantity below 1");
            return self.cart.clone();
        }
        tracing::debug!(product_id = %product.id, quantity, "added to cart");
        self.persist()
    }

    /// Add a single unit of a product.
    pub fn add_one(&mut self, product: &Product) -> Cart {
        self.add(product, 1)
    }

    /// Remove a product. Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) -> Cart {
        let removed = self.cart.remove(product_id);
        tracing::debug!(product_id = %product_id, removed, "removed from cart");
        self.persist()
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Callers are expected to reject quantities below 1 themselves; such
    /// requests are ignored without a write. An absent product is a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Cart {
        if quantity < 1 {
            tracing::debug!(product_id = %product_id, quantity, "ignoring quantity below 1");
            return self.cart.clone();
        }
        let updated = self.cart.set_quantity(product_id, quantity);
        tracing::debug!(product_id = %product_id, quantity, updated, "updated quantity");
        self.persist()
    }

    /// Re-copy name, price, image, category and stock from a fresh catalog
    /// record. Quantity and position are kept; an absent product is a no-op.
    pub fn refresh(&mut self, product: &Product) -> Cart {
        let refreshed = self.cart.refresh(product);
        tracing::debug!(product_id = %product.id, refreshed, "refreshed cart line");
        self.persist()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Cart {
        self.cart.clear();
        tracing::debug!("cleared cart");
        self.persist()
    }

    /// Whether the most recent write reached the backend.
    pub fn last_persist_ok(&self) -> bool {
        self.last_persist_ok
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Cart {
        self.last_persist_ok = match self.slot.write(&self.storage, &self.cart) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(key = self.slot.key(), error = %e, "cart not persisted");
                false
            }
        };
        self.cart.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Price;
    use shopfront_storage::{MemoryStorage, StorageError};
    use std::cell::Cell;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), Price::from_cents(cents))
    }

    /// Memory storage that counts writes.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        writes: Cell<usize>,
    }

    impl Storage for CountingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.set(self.writes.get() + 1);
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.writes.set(self.writes.get() + 1);
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_open_empty() {
        let store = CartStore::open(MemoryStorage::new());
        assert!(store.cart().is_empty());
        assert!(store.last_persist_ok());
    }

    #[test]
    fn test_one_write_per_mutation() {
        let mut store = CartStore::open(CountingStorage::default());
        let a = product("a", 1000);

        store.add(&a, 1);
        store.add_one(&a);
        store.update_quantity(&a.id, 5);
        store.refresh(&a);
        store.remove(&"missing".into());
        store.remove(&a.id);
        store.clear();

        assert_eq!(store.storage().writes.get(), 7);
    }

    #[test]
    fn test_rejected_requests_do_not_write() {
        let mut store = CartStore::open(CountingStorage::default());
        let a = product("a", 1000);
        store.add(&a, 2);

        let before = store.cart().clone();
        assert_eq!(store.add(&a, 0), before);
        assert_eq!(store.update_quantity(&a.id, 0), before);
        assert_eq!(store.update_quantity(&a.id, -1), before);

        assert_eq!(store.storage().writes.get(), 1);
    }

    #[test]
    fn test_uses_configured_key() {
        let storage = MemoryStorage::new();
        let config = CartConfig {
            storage_key: "guest_cart".to_string(),
        };
        let mut store = CartStore::with_config(&storage, &config);
        store.add_one(&product("a", 100));

        assert!(storage.exists("guest_cart").unwrap());
        assert!(!storage.exists("cart_items").unwrap());
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage);
        store.add_one(&product("a", 100));
        store.clear();

        assert_eq!(storage.get("cart_items").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_failure_keeps_memory_snapshot() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        store.add(&product("a", 1000), 1);

        storage.set_unavailable(true);
        let cart = store.add(&product("a", 1000), 2);
        assert_eq!(cart.quantity_of(&"a".into()), 3);
        assert!(!store.last_persist_ok());

        storage.set_unavailable(false);
        let cart = store.add_one(&product("b", 1));
        assert!(store.last_persist_ok());
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_load_unavailable_storage_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_unavailable(true);

        let store = CartStore::open(storage);
        assert!(store.cart().is_empty());
    }
}
