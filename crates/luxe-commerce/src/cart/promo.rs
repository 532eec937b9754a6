//! Promo codes and the discount rate they unlock.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Fraction of the subtotal taken off, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// No discount.
    pub const ZERO: DiscountRate = DiscountRate(0.0);

    /// Create a rate from a fraction.
    pub fn new(rate: f64) -> Result<Self, CommerceError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(CommerceError::InvalidDiscountRate(rate));
        }
        Ok(Self(rate))
    }

    /// Create a rate from a whole percentage (e.g., `10` for 10%).
    pub fn from_percent(percent: u8) -> Result<Self, CommerceError> {
        Self::new(f64::from(percent) / 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for DiscountRate {
    type Error = CommerceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountRate> for f64 {
    fn from(rate: DiscountRate) -> Self {
        rate.0
    }
}

/// A recognized promo code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCode {
    /// The code customers type (e.g., "LUXE10").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Rate applied to the subtotal.
    pub rate: DiscountRate,
    /// Inactive codes are not recognized.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PromoCode {
    /// Create a new percentage code.
    pub fn percentage(
        code: impl Into<String>,
        name: impl Into<String>,
        percent: u8,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            code: code.into(),
            name: name.into(),
            rate: DiscountRate::from_percent(percent)?,
            active: true,
        })
    }

    /// Case-insensitive match, ignoring surrounding whitespace.
    pub fn matches(&self, input: &str) -> bool {
        self.active && self.code.eq_ignore_ascii_case(input.trim())
    }
}

/// The set of codes the storefront recognizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCatalog {
    codes: Vec<PromoCode>,
}

impl PromoCatalog {
    pub fn new(codes: Vec<PromoCode>) -> Self {
        Self { codes }
    }

    /// Find the active code matching user input.
    pub fn lookup(&self, input: &str) -> Option<&PromoCode> {
        self.codes.iter().find(|c| c.matches(input))
    }

    pub fn codes(&self) -> &[PromoCode] {
        &self.codes
    }
}

impl Default for PromoCatalog {
    /// Only `LUXE10`, worth 10% off.
    fn default() -> Self {
        Self {
            codes: vec![PromoCode {
                code: "LUXE10".to_string(),
                name: "10% off".to_string(),
                rate: DiscountRate(0.10),
                active: true,
            }],
        }
    }
}

/// Promo input and the discount currently in effect.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PromoState {
    /// Text typed in the promo field, cleared on success.
    pub input: String,
    /// Code that produced the current rate.
    pub applied_code: Option<String>,
    discount_rate: DiscountRate,
}

impl PromoState {
    /// Replace the pending promo input.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Apply whatever is in the promo field.
    pub fn apply(&mut self, catalog: &PromoCatalog) -> Result<DiscountRate, CommerceError> {
        let input = self.input.clone();
        self.apply_code(&input, catalog)
    }

    /// Apply a code.
    ///
    /// A recognized code sets the discount rate and clears the input. An
    /// unknown code returns `InvalidDiscountCode` and leaves the state as it
    /// was, including any previously applied rate.
    pub fn apply_code(&mut self, code: &str, catalog: &PromoCatalog) -> Result<DiscountRate, CommerceError> {
        let Some(promo) = catalog.lookup(code) else {
            tracing::debug!(code, "promo code not recognized");
            return Err(CommerceError::InvalidDiscountCode(code.trim().to_string()));
        };

        self.discount_rate = promo.rate;
        self.applied_code = Some(promo.code.clone());
        self.input.clear();
        tracing::debug!(code = %promo.code, rate = promo.rate.value(), "promo code applied");
        Ok(promo.rate)
    }

    /// Drop the applied code.
    pub fn clear(&mut self) {
        self.applied_code = None;
        self.discount_rate = DiscountRate::ZERO;
    }

    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }
}
