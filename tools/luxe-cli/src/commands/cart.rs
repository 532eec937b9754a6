//! Cart commands.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use luxe_cache::FileStore;
use luxe_commerce::cart::QuantityChange;
use luxe_commerce::ProductId;
use luxe_storefront::Storefront;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id, quantity } => {
            let catalog = ctx.catalog()?;
            let product = ctx.product(&catalog, &id)?;
            let total = storefront
                .cart_mut()
                .add_item(product.summary(), quantity)
                .with_context(|| format!("Could not add {}", product.name))?;
            storefront.save()?;
            ctx.output
                .success(&format!("{} added to cart ({} in cart)", product.name, total));
        }
        CartCommand::Remove { id } => {
            if storefront.cart_mut().remove_item(&ProductId::new(id.as_str())) {
                storefront.save()?;
                ctx.output.success(&format!("Removed {} from cart", id));
            } else {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
        }
        CartCommand::Inc { id, to } => {
            let id = ProductId::new(id);
            let current = storefront.cart().get_item(&id).map(|item| item.quantity);
            match current {
                Some(quantity) => {
                    let target = to.unwrap_or(quantity.saturating_add(1));
                    storefront.cart_mut().increase_quantity(&id, target)?;
                    storefront.save()?;
                    ctx.output.success(&format!("Quantity set to {}", target));
                }
                None => ctx.output.warn(&format!("{} is not in the cart", id)),
            }
        }
        CartCommand::Dec { id } => {
            let id = ProductId::new(id);
            match storefront.cart_mut().decrease_quantity(&id) {
                QuantityChange::Decreased(quantity) => {
                    storefront.save()?;
                    ctx.output.success(&format!("Quantity set to {}", quantity));
                }
                QuantityChange::Removed => {
                    storefront.save()?;
                    ctx.output.success(&format!("Removed {} from cart", id));
                }
                QuantityChange::NotFound => {
                    ctx.output.warn(&format!("{} is not in the cart", id));
                }
            }
        }
        CartCommand::Clear { yes } => {
            if !yes && !storefront.cart().is_empty() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every item from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left as it was");
                    return Ok(());
                }
            }
            storefront.cart_mut().clear();
            storefront.save()?;
            ctx.output.success("Cart cleared");
        }
    }

    show(&storefront, ctx)
}

/// Print the cart and its pricing.
pub fn show(storefront: &Storefront<FileStore>, ctx: &Context) -> Result<()> {
    let cart = storefront.cart();
    let pricing = storefront.pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "promo": storefront.promo().applied_code,
            "pricing": pricing,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", cart.item_count()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty. Browse with `luxe catalog`.");
        return Ok(());
    }

    let widths = [4, 16, 5, 10];
    ctx.output.table_row(&["ID", "NAME", "QTY", "SUBTOTAL"], &widths);
    for line in &pricing.line_items {
        let name = cart
            .get_item(&line.product_id)
            .map(|item| item.product.name.as_str())
            .unwrap_or("");
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                name,
                &line.quantity.to_string(),
                &line.subtotal.display(),
            ],
            &widths,
        );
    }

    println!();
    if let Some(code) = &storefront.promo().applied_code {
        ctx.output.kv("Promo", code);
    }
    ctx.output.pricing(&pricing);
    Ok(())
}
