//! Checkout gate.

use std::time::Duration;

use luxe_commerce::cart::CartPricing;
use thiserror::Error;

/// Outcome of asking to check out.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutDecision {
    /// No access token; send the shopper to the login page.
    LoginRequired,
    /// Ready to pay this amount.
    Proceed(CartPricing),
}

impl CheckoutDecision {
    pub fn is_login_required(&self) -> bool {
        matches!(self, CheckoutDecision::LoginRequired)
    }
}

/// Reasons checkout cannot start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
}

/// Stand-in for order submission: waits `delay` and hands the pricing back.
pub async fn simulate_checkout(pricing: CartPricing, delay: Duration) -> CartPricing {
    tracing::info!(total = %pricing.grand_total, "processing checkout");
    tokio::time::sleep(delay).await;
    tracing::info!("proceeding to checkout");
    pricing
}
