//! Stock checks applied by callers before they mutate the cart.
//!
//! The cart never enforces stock: it holds a copy of the stock seen at add
//! time, while the live figure comes from the catalog record the caller just
//! fetched. These helpers combine the two the way the product and cart pages
//! do. A product without a stock figure is treated as unlimited.

use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::StockError;
use serde::{Deserialize, Serialize};

/// Remaining stock below this is shown as "low".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Stock not yet claimed by the cart.
pub fn remaining(stock: i64, in_cart: i64) -> i64 {
    stock.saturating_sub(in_cart)
}

/// Availability band for a remaining-stock figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockLevel {
    /// Nothing left to add.
    OutOfStock,
    /// Fewer than [`LOW_STOCK_THRESHOLD`] left.
    Low(i64),
    /// Plenty left.
    InStock(i64),
}

impl StockLevel {
    /// Classify a remaining-stock figure.
    pub fn of(remaining: i64) -> Self {
        if remaining <= 0 {
            StockLevel::OutOfStock
        } else if remaining < LOW_STOCK_THRESHOLD {
            StockLevel::Low(remaining)
        } else {
            StockLevel::InStock(remaining)
        }
    }

    /// Check if more can be added.
    pub fn is_available(&self) -> bool {
        !matches!(self, StockLevel::OutOfStock)
    }

    /// Availability label, mentioning how many are already in the cart.
    pub fn label(&self, in_cart: i64) -> String {
        let (base, note) = match self {
            StockLevel::OutOfStock => ("Out of Stock".to_string(), format!("({in_cart} in your cart)")),
            StockLevel::Low(n) => (format!("Only {n} left!"), format!("({in_cart} already in cart)")),
            StockLevel::InStock(n) => (format!("{n} available"), format!("({in_cart} in cart)")),
        };
        if in_cart > 0 {
            format!("{base} {note}")
        } else {
            base
        }
    }
}

/// Outcome of a quantity change requested from the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Pass the quantity to [`crate::CartStore::update_quantity`].
    Apply(i64),
    /// Below 1: drop the request silently.
    Ignore,
}

/// Validate a new line quantity against the stock copied into the line.
pub fn check_quantity_change(
    new_quantity: i64,
    max_stock: Option<i64>,
) -> Result<QuantityChange, StockError> {
    if new_quantity < 1 {
        return Ok(QuantityChange::Ignore);
    }
    match max_stock {
        Some(stock) if new_quantity > stock => Err(StockError::ExceedsStock { stock }),
        _ => Ok(QuantityChange::Apply(new_quantity)),
    }
}

/// Stock view of one product against the current cart.
#[derive(Debug, Clone, Copy)]
pub struct StockCheck<'a> {
    cart: &'a Cart,
    product: &'a Product,
}

impl<'a> StockCheck<'a> {
    /// Check `product` (a fresh catalog record) against `cart`.
    pub fn new(cart: &'a Cart, product: &'a Product) -> Self {
        Self { cart, product }
    }

    /// Units of this product already in the cart.
    pub fn in_cart(&self) -> i64 {
        self.cart.quantity_of(&self.product.id)
    }

    /// Units that can still be added, `None` when stock is not tracked.
    pub fn remaining(&self) -> Option<i64> {
        self.product.stock.map(|stock| remaining(stock, self.in_cart()))
    }

    /// Availability band, `None` when stock is not tracked.
    pub fn level(&self) -> Option<StockLevel> {
        self.remaining().map(StockLevel::of)
    }

    /// Validate adding `quantity` units.
    pub fn check_add(&self, quantity: i64) -> Result<(), StockError> {
        if quantity < 1 {
            return Err(StockError::InvalidQuantity(quantity));
        }
        let Some(stock) = self.product.stock else {
            return Ok(());
        };

        let in_cart = self.in_cart();
        if in_cart.saturating_add(quantity) <= stock {
            return Ok(());
        }
        if in_cart == 0 {
            Err(StockError::ExceedsStock { stock })
        } else {
            Err(StockError::ExceedsRemaining {
                requested: quantity,
                in_cart,
                stock,
            })
        }
    }

    /// Whether the add control is enabled for a selected quantity.
    pub fn can_add(&self, selected: i64) -> bool {
        match self.remaining() {
            Some(remaining) => remaining > 0 && selected <= remaining,
            None => true,
        }
    }

    /// Step the quantity selector up by one.
    ///
    /// Returns the new selection, or the notice to show when the selector is
    /// already at the limit.
    pub fn increment(&self, selected: i64) -> Result<i64, StockError> {
        let Some(stock) = self.product.stock else {
            return Ok(selected.saturating_add(1));
        };

        let in_cart = self.in_cart();
        if in_cart.saturating_add(selected).saturating_add(1) > stock {
            return Err(StockError::NoMoreAvailable { in_cart, stock });
        }
        if selected >= stock {
            return Err(StockError::ExceedsStock { stock });
        }
        Ok(selected + 1)
    }

    /// Step the quantity selector down by one, never below 1.
    pub fn decrement(selected: i64) -> i64 {
        if selected > 1 {
            selected - 1
        } else {
            1
        }
    }
}
