//! The storage contract.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::CacheError;

/// Cookie `SameSite` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

/// Options for [`KeyValueStore::set`].
///
/// Modeled on cookie attributes. Stores enforce `expires`; `secure` and
/// `same_site` are recorded with the entry for hosts that forward them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetOptions {
    /// Lifetime of the entry. `None` keeps it until removed.
    pub expires: Option<Duration>,
    /// Only send over secure transports.
    pub secure: bool,
    pub same_site: SameSite,
}

impl SetOptions {
    /// Entry expires after `duration`.
    pub fn expires_in(mut self, duration: Duration) -> Self {
        self.expires = Some(duration);
        self
    }

    /// Mark the entry secure.
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }
}

/// A value together with its storage attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub same_site: SameSite,
}

impl StoredEntry {
    /// Build an entry, resolving a relative expiry against `now`.
    pub fn new(value: &str, options: &SetOptions, now: DateTime<Utc>) -> Result<Self, CacheError> {
        let expires_at = match options.expires {
            Some(d) => Some(
                now.checked_add_signed(d)
                    .ok_or_else(|| CacheError::ExpiryOutOfRange(d.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            value: value.to_string(),
            expires_at,
            secure: options.secure,
            same_site: options.same_site,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Durable string storage keyed by name.
///
/// Expired entries read as absent.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing and expired keys return `None`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str, options: &SetOptions) -> Result<(), CacheError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key holds a live value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, options: &SetOptions) -> Result<(), CacheError> {
        (**self).set(key, value, options)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        (**self).remove(key)
    }
}
