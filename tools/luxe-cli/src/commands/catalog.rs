//! Browse the collection.

use anyhow::{bail, Result};

use super::CatalogArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    if let Some(id) = args.id {
        let product = ctx.product(&catalog, &id)?;
        if ctx.output.is_json() {
            ctx.output.json(product);
            return Ok(());
        }

        ctx.output.header(&product.name);
        ctx.output.kv("Price", &product.price.display());
        if let Some(saved) = product.savings() {
            ctx.output.kv("You save", &saved.display());
        }
        ctx.output.kv("Category", &product.category);
        ctx.output.kv("Concentration", &product.concentration);
        if let Some(size) = &product.size {
            ctx.output.kv("Size", size);
        }
        if let Some(longevity) = &product.longevity {
            ctx.output.kv("Longevity", longevity);
        }
        if let Some(sillage) = &product.sillage {
            ctx.output.kv("Sillage", sillage);
        }
        ctx.output.kv(
            "Rating",
            &format!("{:.1} ({} reviews)", product.rating, product.reviews),
        );
        ctx.output.kv("Stock", &stock_badge(product.in_stock()));
        ctx.output.info(&product.description);
        return Ok(());
    }

    let products: Vec<_> = match &args.category {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.products().iter().collect(),
    };

    if products.is_empty() {
        if let Some(category) = args.category {
            bail!(
                "No products in category '{}'. Categories: {}",
                category,
                catalog.categories().join(", ")
            );
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("The LUXE Collection");
    let widths = [4, 16, 12, 10, 12];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &products {
        let price = product.price.display();
        let stock = if product.in_stock() {
            "In stock".to_string()
        } else {
            "Sold out".to_string()
        };
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &price,
                &stock,
            ],
            &widths,
        );
    }

    Ok(())
}
