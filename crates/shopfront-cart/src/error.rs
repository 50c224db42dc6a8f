//! Stock check error types.

use thiserror::Error;

/// Reasons a requested quantity is refused before it reaches the cart.
///
/// The `Display` text is the notice shown to the shopper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// Requested quantity is larger than the whole stock.
    #[error("Only {stock} items available in stock")]
    ExceedsStock { stock: i64 },

    /// Requested quantity plus what is already in the cart exceeds stock.
    #[error(
        "Cannot add {requested} more. You already have {in_cart} in cart. Only {stock} available in stock."
    )]
    ExceedsRemaining {
        requested: i64,
        in_cart: i64,
        stock: i64,
    },

    /// Selector cannot go any higher given what is already in the cart.
    #[error("Cannot add more. You have {in_cart} in cart. Only {stock} available total.")]
    NoMoreAvailable { in_cart: i64, stock: i64 },

    /// Quantity below 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
