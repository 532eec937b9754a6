//! Cart pricing calculations.
//!
//! Pricing is derived on demand from the line items and the applied discount
//! rate. Nothing here is stored.

use crate::cart::{DiscountRate, LineItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat-rate shipping with a free-shipping threshold.
///
/// Shipping is free only when the subtotal is strictly greater than the
/// threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingPolicy {
    free_shipping_threshold: Money,
    flat_fee: Money,
}

impl ShippingPolicy {
    /// Create a policy. Both amounts must share a currency and be non-negative.
    pub fn new(free_shipping_threshold: Money, flat_fee: Money) -> Result<Self, CommerceError> {
        if free_shipping_threshold.currency != flat_fee.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: free_shipping_threshold.currency.code().to_string(),
                got: flat_fee.currency.code().to_string(),
            });
        }
        if flat_fee.is_negative() {
            return Err(CommerceError::NegativePrice("shipping".to_string()));
        }
        Ok(Self {
            free_shipping_threshold,
            flat_fee,
        })
    }

    /// Free shipping over 100, otherwise a flat fee of 15.
    pub fn standard(currency: Currency) -> Self {
        let places = 10_i64.pow(currency.decimal_places());
        Self {
            free_shipping_threshold: Money::new(100 * places, currency),
            flat_fee: Money::new(15 * places, currency),
        }
    }

    pub fn currency(&self) -> Currency {
        self.flat_fee.currency
    }

    pub fn free_shipping_threshold(&self) -> Money {
        self.free_shipping_threshold
    }

    pub fn flat_fee(&self) -> Money {
        self.flat_fee
    }

    /// Shipping charged for a given subtotal.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount_cents > self.free_shipping_threshold.amount_cents {
            Money::zero(self.currency())
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::standard(Currency::USD)
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Discount rate that produced `discount_total`.
    pub discount_rate: DiscountRate,
    /// Total discount amount.
    pub discount_total: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Final total (subtotal - discount + shipping).
    pub grand_total: Money,
    /// Subtotal still needed before shipping becomes free (zero once it is).
    pub until_free_shipping: Money,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.discount_total.amount_cents > 0
    }

    /// Get discount percentage of subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.amount_cents == 0 {
            return 0.0;
        }
        (self.discount_total.amount_cents as f64 / self.subtotal.amount_cents as f64) * 100.0
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product of the line.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// Subtotal (unit_price * quantity).
    pub subtotal: Money,
}

/// Price a set of line items.
///
/// - `subtotal = Σ price × quantity`
/// - `discount = subtotal × rate`, rounded to the minor unit
/// - `shipping` per `policy`, decided on the pre-discount subtotal
/// - `total = subtotal − discount + shipping`
///
/// The total is not clamped: with a rate in [0, 1] and non-negative prices
/// and fees it cannot go below zero.
pub fn price_items(
    items: &[LineItem],
    rate: DiscountRate,
    policy: &ShippingPolicy,
) -> Result<CartPricing, CommerceError> {
    let currency = policy.currency();

    let mut line_items = Vec::with_capacity(items.len());
    for item in items {
        let unit_price = item.product.price;
        if unit_price.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }
        if unit_price.is_negative() {
            return Err(CommerceError::NegativePrice(item.product.id.to_string()));
        }
        let subtotal = unit_price
            .try_multiply(i64::from(item.quantity))
            .ok_or(CommerceError::Overflow)?;
        line_items.push(LineItemPricing {
            product_id: item.product.id.clone(),
            unit_price,
            quantity: item.quantity,
            subtotal,
        });
    }

    let subtotal = Money::try_sum(line_items.iter().map(|l| &l.subtotal), currency)
        .ok_or(CommerceError::Overflow)?;
    let discount_total = subtotal.multiply_decimal(rate.value());
    let shipping_total = policy.shipping_for(&subtotal);
    let grand_total = subtotal
        .try_subtract(&discount_total)
        .and_then(|m| m.try_add(&shipping_total))
        .ok_or(CommerceError::Overflow)?;

    let until_free_shipping = policy
        .free_shipping_threshold()
        .try_subtract(&subtotal)
        .filter(|_| !shipping_total.is_zero())
        .map(|gap| Money::new(gap.amount_cents.max(0) + 1, currency))
        .unwrap_or_else(|| Money::zero(currency));

    Ok(CartPricing {
        subtotal,
        discount_rate: rate,
        discount_total,
        shipping_total,
        grand_total,
        until_free_shipping,
        line_items,
    })
}
