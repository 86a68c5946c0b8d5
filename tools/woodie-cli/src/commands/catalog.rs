//! Catalog browsing commands: products, categories, category pages, banners.

use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::Value;
use woodie_commerce::catalog::{
    active_categories, categories_from_param, facet_categories, format_category_param, slugify,
    CategoryPage, ListingQuery, ProductSummary,
};
use woodie_commerce::CommerceError;
use woodie_data::CommerceClient;

use super::{CategoryArgs, ProductsArgs};
use crate::context::Context;
use crate::output::price_tag;

const TABLE_WIDTHS: [usize; 4] = [32, 20, 20, 30];

#[derive(Serialize)]
struct Listing<'a> {
    categories: &'a [String],
    selected: &'a [String],
    products: &'a [ProductSummary],
}

/// Run the products command.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let (raw, categories) = tokio::join!(ctx.all_products(&client), active_facets(&client, ctx));
    let summaries = ProductSummary::from_raw_list(&raw?);
    let facets = facet_categories(&categories, &summaries);

    let selected = select_categories(&args.categories, &facets, ctx);
    let query = ListingQuery::new()
        .with_categories(selected)
        .with_price_bounds(
            args.min.as_deref().unwrap_or(""),
            args.max.as_deref().unwrap_or(""),
        )
        .with_sort(args.sort);
    if let Some(param) = format_category_param(&query.categories) {
        ctx.output.debug(&format!("categoryP={}", param));
    }

    let listed = query.apply(&summaries);

    if ctx.output.is_json() {
        ctx.output.json(&Listing {
            categories: &facets,
            selected: &query.categories,
            products: &listed,
        });
        return Ok(());
    }

    ctx.output.header("Products");
    if !facets.is_empty() {
        ctx.output.kv("Categories", &facets.join(", "));
    }
    print_table(&listed, ctx);
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {} of {} product(s), sorted {}",
        listed.len(),
        summaries.len(),
        query.sort
    ));
    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let (raw, active) = tokio::join!(ctx.all_products(&client), active_facets(&client, ctx));
    let summaries = ProductSummary::from_raw_list(&raw?);
    let facets = facet_categories(&active, &summaries);

    if ctx.output.is_json() {
        let entries: Vec<Value> = facets
            .iter()
            .map(|name| serde_json::json!({ "name": name, "slug": slugify(name) }))
            .collect();
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header("Categories");
    if facets.is_empty() {
        ctx.output.info("No categories found.");
        return Ok(());
    }
    for name in &facets {
        let count = summaries
            .iter()
            .filter(|p| p.category.as_ref() == Some(name))
            .count();
        ctx.output
            .list_item(&format!("{} ({}) [{}]", name, count, slugify(name)));
    }
    Ok(())
}

/// Run the category command.
pub async fn category(args: CategoryArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let raw = ctx.all_products(&client).await?;
    let summaries = ProductSummary::from_raw_list(&raw);
    let page = CategoryPage::build(&args.slug, &summaries);
    if page.is_empty() {
        return Err(CommerceError::CategoryNotFound(args.slug).into());
    }

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&page.name);
    print_table(&page.products, ctx);
    Ok(())
}

/// Run the banners command.
pub async fn banners(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Loading banners...");
    let result = client.banners().await;
    spinner.finish_and_clear();
    let banners = result.context("Failed to load banners")?;

    if ctx.output.is_json() {
        ctx.output.json(&banners);
        return Ok(());
    }

    ctx.output.header("Banners");
    if banners.is_empty() {
        ctx.output.info("No active banners.");
        return Ok(());
    }
    for banner in &banners {
        let title = ["title", "name"]
            .iter()
            .find_map(|k| banner[*k].as_str())
            .unwrap_or("(untitled)");
        let image = ["image", "imageURL", "img"]
            .iter()
            .find_map(|k| banner[*k].as_str())
            .unwrap_or("-");
        ctx.output.list_item(&format!("{}  {}", title, image));
    }
    Ok(())
}

/// Enabled category names, or none when the categories endpoint fails.
async fn active_facets(client: &CommerceClient, ctx: &Context) -> Vec<String> {
    match client.categories().await {
        Ok(categories) => active_categories(&categories),
        Err(e) => {
            ctx.output
                .warn(&format!("Categories unavailable, using product categories: {}", e));
            Vec::new()
        }
    }
}

/// Match `--category` values against facet names, then slugs.
fn select_categories(requested: &[String], facets: &[String], ctx: &Context) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();
    for value in requested {
        let matches = if facets.contains(value) {
            vec![value.clone()]
        } else {
            categories_from_param(value, facets)
        };
        if matches.is_empty() {
            ctx.output.warn(&format!("Unknown category ignored: {}", value));
        }
        for name in matches {
            if !selected.contains(&name) {
                selected.push(name);
            }
        }
    }
    selected
}

fn print_table(products: &[ProductSummary], ctx: &Context) {
    ctx.output
        .table_row(&["TITLE", "PRICE", "CATEGORY", "ID"], &TABLE_WIDTHS);
    for p in products {
        let price = price_tag(p.price, p.old_price);
        let price = match &p.discount_label {
            Some(label) => format!("{} {}", price, label),
            None => price,
        };
        ctx.output.table_row(
            &[
                &p.title,
                &price,
                p.category.as_deref().unwrap_or("-"),
                p.id.as_str(),
            ],
            &TABLE_WIDTHS,
        );
    }
}
