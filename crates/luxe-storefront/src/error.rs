//! Error types for the storefront service.

use thiserror::Error;

use crate::checkout::CheckoutError;

/// Errors that can occur while driving the storefront.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Cart, wishlist or pricing failure.
    #[error(transparent)]
    Commerce(#[from] luxe_commerce::CommerceError),

    /// Durable storage failure.
    #[error(transparent)]
    Cache(#[from] luxe_cache::CacheError),

    /// Token holder failure.
    #[error(transparent)]
    Auth(#[from] luxe_auth::AuthError),

    /// Checkout could not proceed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error while reading or writing configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for StorefrontError {
    fn from(err: toml::de::Error) -> Self {
        StorefrontError::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for StorefrontError {
    fn from(err: toml::ser::Error) -> Self {
        StorefrontError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        StorefrontError::ConfigError(err.to_string())
    }
}
