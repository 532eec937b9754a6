//! Checkout.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use luxe_storefront::{CheckoutDecision, CheckoutError, StorefrontError};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    let pricing = match storefront.checkout() {
        Ok(CheckoutDecision::LoginRequired) => {
            bail!("Please log in to check out (`luxe login --token <TOKEN>`)")
        }
        Ok(CheckoutDecision::Proceed(pricing)) => pricing,
        Err(StorefrontError::Checkout(CheckoutError::EmptyCart)) => {
            bail!("Your cart is empty")
        }
        Err(e) => return Err(e.into()),
    };

    ctx.output.header("Order Summary");
    ctx.output.pricing(&pricing);

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Pay {}?", pricing.grand_total.display()))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Processing...");
    let decision = storefront.process_checkout().await;
    spinner.finish_and_clear();

    match decision? {
        CheckoutDecision::Proceed(pricing) => {
            if ctx.output.is_json() {
                ctx.output.json(&pricing);
            } else {
                ctx.output.success("Proceeding to checkout...");
            }
        }
        CheckoutDecision::LoginRequired => bail!("Session ended during checkout, please log in again"),
    }
    Ok(())
}
