//! Show the cart and its order summary.

use anyhow::Result;
use serde_json::json;
use shopfront_cart::{Cart, OrderSummary};

use crate::context::Context;
use crate::output::truncate;

const WIDTHS: [usize; 5] = [12, 28, 10, 5, 10];

/// Run the show command.
pub fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    print_cart(store.cart(), ctx);
    Ok(())
}

/// Print a cart snapshot, as a table or as JSON.
pub fn print_cart(cart: &Cart, ctx: &Context) {
    let summary = OrderSummary::for_cart(cart);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart,
            "summary": summary,
        }));
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    ctx.output.header("Shopping Cart");
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL"], &WIDTHS);

    for line in &summary.lines {
        let id = line.product_id.to_string();
        let name = truncate(&line.name, WIDTHS[1]);
        let unit = line.unit_price.display();
        let qty = line.quantity.to_string();
        let total = line.total.display();
        ctx.output
            .table_row(&[&id, &name, &unit, &qty, &total], &WIDTHS);
    }

    ctx.output.header("Order Summary");
    ctx.output.kv(
        &format!("Subtotal ({} items)", summary.item_count),
        &summary.subtotal.display(),
    );
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &summary.tax.display());
    ctx.output.kv("Total", &summary.total.display());
}
