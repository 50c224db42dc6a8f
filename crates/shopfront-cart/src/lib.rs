//! Persistent client-side shopping cart for the Shopfront storefront.
//!
//! This crate provides:
//!
//! - **Catalog**: product records as delivered by the catalog API
//! - **Cart**: line items keyed by product, totals, order summary
//! - **Store**: a cart persisted to a key-value slot after every change
//! - **Stock**: checks callers run before adding or changing quantities
//!
//! # Example
//!
//! ```rust
//! use shopfront_cart::prelude::*;
//! use shopfront_storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut store = CartStore::open(storage.clone());
//!
//! let lamp = Product::new("lamp", "Desk Lamp", Price::from_cents(2450)).with_stock(3);
//! StockCheck::new(store.cart(), &lamp).check_add(2).unwrap();
//! store.add(&lamp, 2);
//!
//! // A second store over the same storage sees the persisted cart
//! let reopened = CartStore::open(storage);
//! assert_eq!(reopened.cart().total().display(), "$49.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod stock;

pub use cart::{Cart, CartStore, LineItem, LineTotal, OrderSummary};
pub use catalog::{CategoryRef, Product, ProductImage};
pub use config::CartConfig;
pub use error::StockError;
pub use ids::ProductId;
pub use money::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartStore, LineItem, LineTotal, OrderSummary};
    pub use crate::catalog::{CategoryRef, Product, ProductImage};
    pub use crate::config::CartConfig;
    pub use crate::error::StockError;
    pub use crate::ids::ProductId;
    pub use crate::money::Price;
    pub use crate::stock::{check_quantity_change, QuantityChange, StockCheck, StockLevel};
}
