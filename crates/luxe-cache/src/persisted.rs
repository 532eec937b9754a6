//! Versioned state envelopes stored under a single key.

use std::marker::PhantomData;

use crate::store::KeyValueStore;
use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// What is written to the store: `{ "state": ..., "version": N }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState<T> {
    /// The saved state.
    pub state: T,
    /// Schema version of `state`.
    pub version: u32,
}

/// A named, versioned slot for one piece of state.
///
/// Loading never fails: a missing key, a value that no longer decodes, or a
/// value written under another version all yield `T::default()`. Saving is
/// an explicit step so state transitions can be tested without a store.
///
/// # Example
///
/// ```rust,ignore
/// let slot = PersistedSlot::<Cart>::new("cart-storage");
/// let mut cart = slot.load(&cache);
/// cart.add_one(product)?;
/// slot.save(&cache, &cart)?;
/// ```
#[derive(Debug, Clone)]
pub struct PersistedSlot<T> {
    key: String,
    version: u32,
    _phantom: PhantomData<T>,
}

impl<T> PersistedSlot<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// A slot at version 0.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_version(key, 0)
    }

    pub fn with_version(key: impl Into<String>, version: u32) -> Self {
        Self {
            key: key.into(),
            version,
            _phantom: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Read the stored state, or the default if there is none usable.
    pub fn load<S: KeyValueStore>(&self, cache: &Cache<S>) -> T {
        match self.try_load(cache) {
            Ok(Some(state)) => state,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable persisted state");
                T::default()
            }
        }
    }

    /// Read the stored state, surfacing decode failures.
    ///
    /// A version mismatch is reported as `Ok(None)`.
    pub fn try_load<S: KeyValueStore>(&self, cache: &Cache<S>) -> Result<Option<T>, CacheError> {
        let Some(envelope) = cache.get::<PersistedState<T>>(&self.key)? else {
            return Ok(None);
        };

        if envelope.version != self.version {
            tracing::warn!(
                key = %self.key,
                stored = envelope.version,
                expected = self.version,
                "discarding persisted state from another version"
            );
            return Ok(None);
        }
        Ok(Some(envelope.state))
    }

    /// Write the state.
    pub fn save<S: KeyValueStore>(&self, cache: &Cache<S>, state: &T) -> Result<(), CacheError> {
        let envelope = PersistedState {
            state,
            version: self.version,
        };
        cache.set(&self.key, &envelope)
    }

    /// Remove the stored state.
    pub fn clear<S: KeyValueStore>(&self, cache: &Cache<S>) -> Result<(), CacheError> {
        cache.delete(&self.key)
    }
}
