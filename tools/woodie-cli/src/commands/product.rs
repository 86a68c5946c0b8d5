//! Product detail command.

use anyhow::Result;
use serde::Serialize;
use woodie_commerce::catalog::{find_product, AttributeSelection, PriceDisplay, Product};
use woodie_commerce::CommerceError;
use woodie_data::CommerceClient;

use super::ProductArgs;
use crate::context::Context;
use crate::output::stock_badge;

#[derive(Serialize)]
struct Detail<'a> {
    product: &'a Product,
    selection: &'a AttributeSelection,
    pricing: &'a PriceDisplay,
}

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let product = load_product(&args.slug, &client, ctx).await?;
    let selection = selection_for(&product, &args.attrs, ctx)?;
    let pricing = product.pricing(&selection);

    if ctx.output.is_json() {
        ctx.output.json(&Detail {
            product: &product,
            selection: &selection,
            pricing: &pricing,
        });
        return Ok(());
    }

    ctx.output.header(&product.title);
    if let Some(sku) = &product.sku {
        ctx.output.kv("SKU", sku);
    }
    ctx.output.kv("Stock", &stock_badge(product.stock));
    if let Some(category) = &product.category {
        ctx.output
            .kv("Category", &format!("{} ({})", category.name, category.href()));
    }

    let mut price = pricing.price.display_fixed();
    if pricing.old_price > pricing.price {
        price.push_str(&format!("  was {}", pricing.old_price.display_fixed()));
    }
    if let Some(label) = &pricing.discount_label {
        price.push_str(&format!("  {}", label));
    }
    ctx.output.kv("Price", &price);

    if !product.variants.is_empty() {
        let variant = match (&pricing.variant_id, pricing.matched) {
            (Some(id), _) => id.to_string(),
            (None, true) => "matched".to_string(),
            (None, false) => "no matching variant (base price)".to_string(),
        };
        ctx.output.kv("Variant", &variant);
    }

    for option in product.selectable_attributes() {
        let values: Vec<String> = option
            .values
            .iter()
            .map(|v| {
                if selection.get(&option.name) == Some(v.as_str()) {
                    format!("[{}]", v)
                } else {
                    v.clone()
                }
            })
            .collect();
        ctx.output.kv(&option.name, &values.join(" "));
    }

    ctx.output.kv("Reviews", &product.review_count.to_string());
    if let Some(youtube) = &product.youtube {
        ctx.output.kv("Video", youtube);
    }
    ctx.output.kv("Images", &product.images.join(", "));
    if ctx.output.is_verbose() && !product.description_html.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description_html);
    }
    Ok(())
}

/// Find a product in the full listing by path, then by id.
pub(crate) async fn load_product(
    slug: &str,
    client: &CommerceClient,
    ctx: &Context,
) -> Result<Product> {
    let raw = ctx.all_products(client).await?;
    let record =
        find_product(&raw, slug).ok_or_else(|| CommerceError::ProductNotFound(slug.to_string()))?;
    Ok(Product::from_raw(record)?)
}

/// The first variant's values, overridden by `Name=Value` arguments.
pub(crate) fn selection_for(
    product: &Product,
    attrs: &[String],
    ctx: &Context,
) -> Result<AttributeSelection> {
    let requested = AttributeSelection::from_pairs(attrs)?;
    for (name, value) in requested.iter() {
        match product.attributes.iter().find(|a| a.name == name) {
            None => ctx
                .output
                .warn(&format!("{} has no attribute named {}", product.title, name)),
            Some(option) if !option.values.iter().any(|v| v == value) => ctx
                .output
                .warn(&format!("{} is not a listed value for {}", value, name)),
            Some(_) => {}
        }
    }

    let mut selection = product.default_selection();
    selection.merge(&requested);
    Ok(selection)
}
