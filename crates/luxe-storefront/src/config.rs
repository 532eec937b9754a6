//! Storefront configuration.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock LUXE behavior: USD, free shipping over $100.00, a $15.00 flat fee,
//! the `LUXE10` code, a 7-day token and a one-second loading cadence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use luxe_commerce::cart::{PromoCatalog, PromoCode, ShippingPolicy};
use luxe_commerce::catalog::LUXE_COLLECTION_CURRENCY;
use luxe_commerce::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::loading::LoadingSchedule;
use crate::StorefrontError;

/// File names searched for by [`StorefrontConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["luxe.toml", ".luxe.toml", "luxe.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency all prices are expressed in.
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub shipping: ShippingConfig,

    /// Recognized promo codes.
    #[serde(default = "default_promo_codes")]
    pub promo_codes: Vec<PromoCode>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub loading: LoadingConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_promo_codes() -> Vec<PromoCode> {
    PromoCatalog::default().codes().to_vec()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            shipping: ShippingConfig::default(),
            promo_codes: default_promo_codes(),
            auth: AuthConfig::default(),
            loading: LoadingConfig::default(),
            checkout: CheckoutConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: StorefrontConfig = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded storefront config");
        Ok(config)
    }

    /// Check the values serde accepts but the storefront cannot run with.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.currency != LUXE_COLLECTION_CURRENCY {
            return Err(StorefrontError::ConfigError(format!(
                "currency must be {} to match the LUXE collection, got {}",
                LUXE_COLLECTION_CURRENCY, self.currency
            )));
        }
        self.shipping_policy()?;
        luxe_auth::token_lifetime(self.auth.token_expiry_days)
            .map_err(|e| StorefrontError::ConfigError(format!("auth.token_expiry_days: {e}")))?;
        if self.loading.step_interval_ms == 0 {
            return Err(StorefrontError::ConfigError(
                "loading.step_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save config to a file, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorefrontError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Walk up from `start` looking for a config file.
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        let mut dir = Some(start.as_ref());
        while let Some(current) = dir {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            dir = current.parent();
        }
        None
    }

    /// Shipping rules in the configured currency.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy, StorefrontError> {
        let policy = ShippingPolicy::new(
            Money::from_decimal(self.shipping.free_shipping_threshold, self.currency),
            Money::from_decimal(self.shipping.flat_fee, self.currency),
        )?;
        Ok(policy)
    }

    pub fn promo_catalog(&self) -> PromoCatalog {
        PromoCatalog::new(self.promo_codes.clone())
    }

    pub fn loading_schedule(&self) -> LoadingSchedule {
        LoadingSchedule::new(
            Duration::from_millis(self.loading.step_interval_ms),
            Duration::from_millis(self.loading.completion_delay_ms),
        )
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.delay_ms)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Shipping thresholds, in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Subtotals strictly above this ship free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: f64,

    /// Fee charged otherwise.
    #[serde(default = "default_flat_fee")]
    pub flat_fee: f64,
}

fn default_free_shipping_threshold() -> f64 {
    100.0
}

fn default_flat_fee() -> f64 {
    15.0
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_fee: default_flat_fee(),
        }
    }
}

/// Access token storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_expiry_days")]
    pub token_expiry_days: i64,
}

fn default_token_expiry_days() -> i64 {
    luxe_auth::DEFAULT_EXPIRY_DAYS
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_expiry_days: default_token_expiry_days(),
        }
    }
}

/// Loading sequence timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingConfig {
    #[serde(default = "default_second")]
    pub step_interval_ms: u64,

    #[serde(default = "default_second")]
    pub completion_delay_ms: u64,
}

fn default_second() -> u64 {
    1000
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_second(),
            completion_delay_ms: default_second(),
        }
    }
}

/// Checkout behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Artificial processing delay.
    #[serde(default = "default_checkout_delay")]
    pub delay_ms: u64,
}

fn default_checkout_delay() -> u64 {
    2000
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_checkout_delay(),
        }
    }
}

/// Where durable state lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file store. Hosts pick their own default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.promo_codes.len(), 1);
        assert_eq!(config.promo_codes[0].code, "LUXE10");
    }

    #[test]
    fn test_partial_toml() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            currency = "EUR"

            [shipping]
            flat_fee = 9.5

            [[promo_codes]]
            code = "SPRING20"
            name = "Spring sale"
            rate = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.shipping.free_shipping_threshold, 100.0);
        assert_eq!(config.shipping.flat_fee, 9.5);

        let catalog = config.promo_catalog();
        assert!(catalog.lookup("spring20").is_some());
        assert!(catalog.lookup("LUXE10").is_none());

        let policy = config.shipping_policy().unwrap();
        assert_eq!(policy.flat_fee(), Money::new(950, Currency::EUR));
    }

    #[test]
    fn test_rejects_out_of_range_rate() {
        let result: Result<StorefrontConfig, _> = toml::from_str(
            r#"
            [[promo_codes]]
            code = "FREE"
            name = "Everything"
            rate = 1.5
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(StorefrontConfig::default().validate().is_ok());

        for days in [0, -3, i64::MAX] {
            let mut config = StorefrontConfig::default();
            config.auth.token_expiry_days = days;
            assert!(config.validate().is_err(), "{days} days should be rejected");
        }

        let mut config = StorefrontConfig::default();
        config.currency = Currency::EUR;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("USD"));

        let mut config = StorefrontConfig::default();
        config.loading.step_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luxe.toml");
        std::fs::write(&path, "[auth]\ntoken_expiry_days = 0\n").unwrap();
        assert!(StorefrontConfig::load(&path).is_err());

        std::fs::write(&path, "currency = \"EUR\"\n").unwrap();
        assert!(StorefrontConfig::load(&path).is_err());
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.checkout.delay_ms = 10;

        for name in ["luxe.toml", "luxe.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".luxe.toml"), "").unwrap();

        let found = StorefrontConfig::discover(&nested).unwrap();
        assert_eq!(found, dir.path().join(".luxe.toml"));
    }

    #[test]
    fn test_durations() {
        let config = StorefrontConfig::default();
        assert_eq!(config.checkout_delay(), Duration::from_secs(2));
        let schedule = config.loading_schedule();
        assert_eq!(schedule.step_interval(), Duration::from_secs(1));
        assert_eq!(schedule.completion_delay(), Duration::from_secs(1));
    }
}
