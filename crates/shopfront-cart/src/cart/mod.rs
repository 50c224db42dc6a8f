//! Shopping cart module.
//!
//! Contains the cart snapshot, line items, the persistent store and the
//! order summary shown on the cart page.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, LineItem};
pub use pricing::{LineTotal, OrderSummary};
pub use store::CartStore;
