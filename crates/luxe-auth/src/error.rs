//! Authentication errors.

use thiserror::Error;

use crate::FormErrors;

/// Message shown when the auth endpoint rejects a request without one.
pub const DEFAULT_REJECTION: &str = "Login failed. Please try again.";

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The endpoint rejected the request, or accepted it without a token.
    #[error("{0}")]
    Rejected(String),

    /// A form failed validation.
    #[error("invalid form: {0}")]
    InvalidForm(FormErrors),

    /// Token value was empty.
    #[error("access token must not be empty")]
    EmptyToken,

    /// Token lifetime is not a positive, representable number of days.
    #[error("token expiry must be a positive number of days, got {0}")]
    InvalidExpiry(i64),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] luxe_cache::CacheError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Check if the failure came from the remote endpoint.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::Rejected(_))
    }
}
