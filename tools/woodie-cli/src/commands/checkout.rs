//! Checkout summary command.

use anyhow::{Context as _, Result};
use woodie_commerce::checkout::{BuyNow, CheckoutMode, DeliveryArea, OrderSummary};
use woodie_commerce::CommerceError;

use super::CheckoutArgs;
use crate::context::Context;

const TABLE_WIDTHS: [usize; 4] = [36, 12, 5, 12];

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    if let Some(code) = args.area.as_deref() {
        if DeliveryArea::find(code).is_none() {
            ctx.output.warn(&format!(
                "Unknown delivery area '{}', using {}",
                code,
                DeliveryArea::default_area().code
            ));
        }
    }
    let area = DeliveryArea::find_or_default(args.area.as_deref());

    let summary = match args.product.as_deref() {
        Some(slug) => {
            let client = ctx.client()?;
            let spinner = ctx.output.spinner("Loading product...");
            let result = client.product_by_path(slug).await;
            spinner.finish_and_clear();
            let raw = result
                .with_context(|| format!("Failed to load product '{}'", slug))?
                .ok_or_else(|| CommerceError::ProductNotFound(slug.to_string()))?;
            let buy = BuyNow::from_raw(&raw, slug, args.qty.as_deref());
            OrderSummary::buy_now(&buy, area)
        }
        None => {
            let cart = ctx.cart()?;
            OrderSummary::from_cart(cart.lines(), area)
        }
    }
    .with_payment(args.payment);

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    let title = match summary.mode {
        CheckoutMode::Cart => "Checkout",
        CheckoutMode::BuyNow => "Checkout (buy now)",
    };
    ctx.output.header(title);

    if summary.is_empty() {
        ctx.output.info("Your cart is empty. Add something with `woodie cart add`.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ITEM", "PRICE", "QTY", "TOTAL"], &TABLE_WIDTHS);
    for line in &summary.lines {
        let qty = line.quantity.to_string();
        ctx.output.table_row(
            &[
                &line.title,
                &line.price.display(),
                &qty,
                &line.line_total.display(),
            ],
            &TABLE_WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Items", &summary.item_count().to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.display_fixed());
    ctx.output.kv(
        "Delivery",
        &format!("{} {}", summary.area.label, summary.delivery_fee.display_fixed()),
    );
    ctx.output.kv("Total", &summary.total.display_fixed());
    ctx.output.kv("Payment", summary.payment.label());

    if ctx.output.is_verbose() {
        ctx.output.info("");
        ctx.output.info("Delivery areas:");
        for option in DeliveryArea::all() {
            ctx.output.list_item(&format!(
                "{} - {} ({})",
                option.code,
                option.label,
                option.fee.display()
            ));
        }
    }
    Ok(())
}
