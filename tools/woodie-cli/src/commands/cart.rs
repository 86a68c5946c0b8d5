//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde::Serialize;
use woodie_commerce::cart::{CartLine, CartStorage, CartStore, Quantity};
use woodie_commerce::Money;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::price_tag;

const TABLE_WIDTHS: [usize; 5] = [28, 32, 18, 5, 12];

#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a [CartLine],
    count: u64,
    subtotal: Money,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { slug, qty, attrs } => {
            let client = ctx.client()?;
            let product = super::product::load_product(&slug, &client, ctx).await?;
            let selection = super::product::selection_for(&product, &attrs, ctx)?;
            let item = product.cart_item(&selection);
            let quantity = Quantity::from(qty.as_str());

            cart.add_to_cart(&item, i64::from(quantity.get()));
            ctx.output
                .success(&format!("Added {} x {}", quantity, item.title));
        }
        CartCommand::Remove { id } => {
            require_line(&cart, &id)?;
            cart.remove_item(&id);
            ctx.output.success(&format!("Removed {}", id));
        }
        CartCommand::Set { id, qty } => {
            require_line(&cart, &id)?;
            cart.set_quantity(&id, Quantity::from(qty.as_str()));
        }
        CartCommand::Inc { id } => {
            require_line(&cart, &id)?;
            cart.increment(&id);
        }
        CartCommand::Dec { id } => {
            require_line(&cart, &id)?;
            cart.decrement(&id);
        }
        CartCommand::Clear { yes } => {
            if cart.is_empty() {
                ctx.output.info("Cart is already empty.");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} item(s) from the cart?", cart.total_count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Clear cancelled");
                    return Ok(());
                }
            }
            cart.clear();
            ctx.output.success("Cart cleared");
        }
    }

    show(&cart, ctx);
    Ok(())
}

fn require_line<S: CartStorage>(cart: &CartStore<S>, id: &str) -> Result<()> {
    if cart.get(id).is_none() {
        bail!("No cart line with id '{}'. Run `woodie cart show` to list ids.", id);
    }
    Ok(())
}

fn show<S: CartStorage>(cart: &CartStore<S>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: cart.lines(),
            count: cart.total_count(),
            subtotal: cart.subtotal(),
        });
        return;
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    ctx.output
        .table_row(&["ID", "ITEM", "PRICE", "QTY", "TOTAL"], &TABLE_WIDTHS);
    for line in cart.lines() {
        let qty = line.quantity.to_string();
        ctx.output.table_row(
            &[
                line.id.as_str(),
                &line.title,
                &price_tag(line.price, line.old_price),
                &qty,
                &line.line_total().display(),
            ],
            &TABLE_WIDTHS,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Items", &cart.total_count().to_string());
    ctx.output.kv("Subtotal", &cart.subtotal().display());
}
