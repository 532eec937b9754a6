//! Shopping cart module.
//!
//! Contains types for the cart, line items, promo codes and pricing.

mod cart;
mod pricing;
mod promo;

pub use cart::{Cart, LineItem, QuantityChange, MAX_QUANTITY_PER_ITEM};
pub use pricing::{price_items, CartPricing, LineItemPricing, ShippingPolicy};
pub use promo::{DiscountRate, PromoCatalog, PromoCode, PromoState};
