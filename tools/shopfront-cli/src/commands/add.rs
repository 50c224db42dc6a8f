//! Add a product to the cart.

use std::fs;

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use shopfront_cart::stock::StockCheck;
use shopfront_cart::{Price, Product, ProductImage};

use super::AddArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// Run the add command.
pub fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    if args.quantity < 1 {
        bail!("Quantity must be at least 1");
    }

    let product = product_from_args(&args, ctx)?;
    let mut store = ctx.open_store()?;

    if args.check_stock {
        let check = StockCheck::new(store.cart(), &product);
        if let Err(e) = check.check_add(args.quantity) {
            match largest_fitting(&check, args.quantity) {
                Some(fits) => bail!("{} (at most {} more can be added)", e, fits),
                None => bail!(e),
            }
        }
    }

    let cart = store.add(&product, args.quantity);
    if !store.last_persist_ok() {
        ctx.output.warn("Cart could not be saved; the change is lost on exit");
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "added": product.id,
            "quantity": cart.quantity_of(&product.id),
            "itemCount": cart.item_count(),
            "total": cart.total(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Added {} x {} ({} in cart)",
        args.quantity,
        product.name,
        cart.quantity_of(&product.id)
    ));

    let check = StockCheck::new(&cart, &product);
    if let Some(level) = check.level() {
        ctx.output.kv("Stock", &stock_badge(level, check.in_cart()));
    }
    if let Err(e) = check.increment(0) {
        ctx.output.info(&e.to_string());
    }
    ctx.output.kv("Cart total", &cart.total().display());

    Ok(())
}

/// Largest quantity not above `requested` that passes the stock check.
fn largest_fitting(check: &StockCheck<'_>, requested: i64) -> Option<i64> {
    let mut quantity = match check.remaining() {
        Some(remaining) => requested.min(remaining),
        None => requested,
    };
    while quantity >= 1 {
        if check.check_add(quantity).is_ok() {
            return Some(quantity);
        }
        if quantity == 1 {
            break;
        }
        quantity = StockCheck::decrement(quantity);
    }
    None
}

/// Build the product record from a catalog JSON file or the flags.
///
/// Flags given alongside `--product` override the file's fields.
fn product_from_args(args: &AddArgs, ctx: &Context) -> Result<Product> {
    let mut product = match &args.product {
        Some(path) => {
            let path = ctx.resolve_path(path);
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read product file: {}", path.display()))?;
            ctx.output.debug(&format!("Loaded product from {}", path.display()));
            serde_json::from_str::<Product>(&content)
                .with_context(|| format!("Failed to parse product file: {}", path.display()))?
        }
        None => {
            let Some(id) = &args.id else {
                bail!("A product ID or --product file is required");
            };
            let Some(price) = args.price else {
                bail!("--price is required unless --product is given");
            };
            let name = args.name.clone().unwrap_or_else(|| id.clone());
            Product::new(id.as_str(), name, Price::from_decimal(price))
        }
    };

    if args.product.is_some() {
        if let Some(name) = &args.name {
            product.name = name.clone();
        }
        if let Some(price) = args.price {
            product.price = Price::from_decimal(price);
        }
    }
    if let Some(stock) = args.stock {
        product = product.with_stock(stock);
    }
    if let Some(category) = &args.category {
        product = product.with_category(category.as_str());
    }
    if let Some(image) = &args.image {
        product.images.insert(0, ProductImage { url: image.clone() });
    }

    Ok(product)
}
