//! Promo code command.

use anyhow::{bail, Result};

use super::PromoArgs;
use crate::context::Context;

/// Run the promo command.
pub async fn run(args: PromoArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;

    if args.clear {
        storefront.clear_promo();
        storefront.save()?;
        ctx.output.success("Promo code removed");
        return super::cart::show(&storefront, ctx);
    }

    let Some(code) = args.code else {
        match &storefront.promo().applied_code {
            Some(code) => ctx.output.kv("Applied", code),
            None => ctx.output.info("No promo code applied"),
        }
        return Ok(());
    };

    match storefront.apply_promo(&code) {
        Ok(rate) => {
            storefront.save()?;
            ctx.output.success(&format!(
                "Promo code applied! {:.0}% off",
                rate.value() * 100.0
            ));
            super::cart::show(&storefront, ctx)
        }
        Err(_) => bail!("Invalid promo code: {}", code.trim()),
    }
}
