//! Wishlist commands.

use anyhow::{bail, Result};
use dialoguer::{Confirm, MultiSelect};
use luxe_cache::FileStore;
use luxe_commerce::ProductId;
use luxe_storefront::Storefront;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;

    match args.command.unwrap_or(WishlistCommand::Show) {
        WishlistCommand::Show => {}
        WishlistCommand::Add { id } => {
            let catalog = ctx.catalog()?;
            let product = ctx.product(&catalog, &id)?;
            if storefront.wishlist_mut().add(product.wishlist_item()) {
                storefront.save()?;
                ctx.output.success(&format!("{} saved to wishlist", product.name));
            } else {
                ctx.output.info(&format!("{} is already saved", product.name));
            }
        }
        WishlistCommand::Remove { id } => {
            if storefront.wishlist_mut().remove(&ProductId::new(id.as_str())) {
                storefront.save()?;
                ctx.output.success(&format!("Removed {} from wishlist", id));
            } else {
                ctx.output.warn(&format!("{} is not in the wishlist", id));
            }
        }
        WishlistCommand::Move { ids, all } => {
            let selected = select(&storefront, ids, all)?;
            if selected.is_empty() {
                ctx.output.warn("Nothing selected");
                return Ok(());
            }

            let available = storefront.wishlist().available_selection(&selected).len();
            ctx.output.info(&format!(
                "{} of {} selected items available",
                available,
                selected.len()
            ));

            let report = storefront.move_to_cart(&selected)?;
            storefront.save()?;

            if ctx.output.is_json() {
                ctx.output.json(&report);
                return Ok(());
            }
            if report.moved_count() > 0 {
                ctx.output
                    .success(&format!("Moved {} items to cart", report.moved_count()));
            }
            for id in &report.out_of_stock {
                ctx.output.warn(&format!("{} is out of stock and stays saved", id));
            }
            for id in &report.not_found {
                ctx.output.warn(&format!("{} is not in the wishlist", id));
            }
        }
        WishlistCommand::Clear { yes } => {
            if !yes && !storefront.wishlist().is_empty() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every saved item?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Wishlist left as it was");
                    return Ok(());
                }
            }
            storefront.wishlist_mut().clear();
            storefront.save()?;
            ctx.output.success("Wishlist cleared");
        }
    }

    show(&storefront, ctx);
    Ok(())
}

/// Resolve the ids to move: explicit, all, or picked interactively.
fn select(storefront: &Storefront<FileStore>, ids: Vec<String>, all: bool) -> Result<Vec<ProductId>> {
    let items = storefront.wishlist().items();

    if all {
        return Ok(items.iter().map(|item| item.id().clone()).collect());
    }
    if !ids.is_empty() {
        return Ok(ids.into_iter().map(ProductId::new).collect());
    }
    if items.is_empty() {
        bail!("Your wishlist is empty");
    }

    let labels: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "{} {} ({})",
                item.product.name,
                item.product.price.display(),
                if item.in_stock { "in stock" } else { "out of stock" }
            )
        })
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("Select items to move to the cart")
        .items(&labels)
        .interact()?;

    Ok(chosen.into_iter().map(|i| items[i].id().clone()).collect())
}

fn show(storefront: &Storefront<FileStore>, ctx: &Context) {
    let wishlist = storefront.wishlist();

    if ctx.output.is_json() {
        ctx.output.json(wishlist.items());
        return;
    }

    ctx.output.header(&format!("Wishlist ({} items)", wishlist.len()));
    if wishlist.is_empty() {
        ctx.output.info("Nothing saved yet.");
        return;
    }

    for item in wishlist.items() {
        ctx.output.list_item(&format!(
            "[{}] {}  {}  {}",
            item.id(),
            item.product.name,
            item.product.price.display(),
            stock_badge(item.in_stock)
        ));
    }
}
