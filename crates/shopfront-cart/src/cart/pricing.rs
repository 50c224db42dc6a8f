//! Order summary calculations.

use crate::cart::Cart;
use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// Pricing breakdown shown next to the cart.
///
/// Shipping is free and no tax is charged at this stage, so the total equals
/// the subtotal. The fields exist so the summary renders the same rows the
/// checkout page does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Sum of line totals.
    pub subtotal: Price,
    /// Shipping cost.
    pub shipping: Price,
    /// Tax amount.
    pub tax: Price,
    /// subtotal + shipping + tax.
    pub total: Price,
    /// Total units in the cart.
    pub item_count: i64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineTotal>,
}

impl OrderSummary {
    /// Summarise a cart.
    pub fn for_cart(cart: &Cart) -> Self {
        let lines: Vec<LineTotal> = cart
            .iter()
            .map(|item| LineTotal {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: item.quantity,
                total: item.line_total(),
            })
            .collect();

        let subtotal = cart.total();
        let shipping = Price::zero();
        let tax = Price::zero();

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            item_count: cart.item_count(),
            lines,
        }
    }

    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub unit_price: Price,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub total: Price,
}
