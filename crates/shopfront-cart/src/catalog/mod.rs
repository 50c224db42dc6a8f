//! Product catalog records.
//!
//! These are the records the catalog service returns. The cart copies the
//! fields it needs out of them at add time and never fetches them itself.

mod product;

pub use product::{CategoryRef, Product, ProductImage};
