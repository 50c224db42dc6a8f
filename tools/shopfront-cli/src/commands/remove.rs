//! Remove a product from the cart.

use anyhow::Result;
use shopfront_cart::ProductId;

use super::RemoveArgs;
use crate::context::Context;

/// Run the remove command.
pub fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::from(args.id);
    let mut store = ctx.open_store()?;

    let Some(line) = store.cart().get(&id).cloned() else {
        ctx.output.warn(&format!("{} is not in the cart", id));
        super::show::print_cart(store.cart(), ctx);
        return Ok(());
    };

    let cart = store.remove(&id);
    if !store.last_persist_ok() {
        ctx.output.warn("Cart could not be saved; the change is lost on exit");
    }

    ctx.output.success(&format!("Removed {}", line.name));
    super::show::print_cart(&cart, ctx);

    Ok(())
}
