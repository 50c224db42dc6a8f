//! Change the quantity of a cart line.

use anyhow::{bail, Result};
use shopfront_cart::stock::{check_quantity_change, QuantityChange};
use shopfront_cart::ProductId;

use super::UpdateArgs;
use crate::context::Context;

/// Run the update command.
///
/// The new quantity is checked against the stock copied into the line when
/// it was added. Quantities below 1 are ignored, as the cart page does.
pub fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::from(args.id);
    let mut store = ctx.open_store()?;

    let Some(line) = store.cart().get(&id).cloned() else {
        bail!("{} is not in the cart", id);
    };

    let quantity = match check_quantity_change(args.quantity, line.stock)? {
        QuantityChange::Apply(quantity) => quantity,
        QuantityChange::Ignore => {
            ctx.output
                .warn("Quantity must be at least 1; use `shopfront remove` to drop the line");
            return Ok(());
        }
    };

    let cart = store.update_quantity(&id, quantity);
    if !store.last_persist_ok() {
        ctx.output.warn("Cart could not be saved; the change is lost on exit");
    }

    ctx.output
        .success(&format!("{}: {} -> {}", line.name, line.quantity, quantity));
    super::show::print_cart(&cart, ctx);

    Ok(())
}
