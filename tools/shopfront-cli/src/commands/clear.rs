//! Empty the cart.

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if store.cart().is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }

    if !args.yes {
        if ctx.output.is_json() {
            bail!("Pass --yes to clear the cart in JSON mode");
        }
        let prompt = format!(
            "Remove all {} items ({}) from the cart?",
            store.cart().item_count(),
            store.cart().total().display()
        );
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    let cart = store.clear();
    if !store.last_persist_ok() {
        ctx.output.warn("Cart could not be saved; the change is lost on exit");
    }

    ctx.output.success("Cart cleared");
    super::show::print_cart(&cart, ctx);

    Ok(())
}
