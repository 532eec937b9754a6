//! In-process store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::store::{KeyValueStore, SetOptions, StoredEntry};
use crate::CacheError;

/// Store backed by a `HashMap`. Contents live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full entry for a key, including attributes, if it is still live.
    pub fn entry(&self, key: &str) -> Result<Option<StoredEntry>, CacheError> {
        let entries = self.read()?;
        Ok(entries
            .get(key)
            .filter(|e| !e.is_expired(Utc::now()))
            .cloned())
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, StoredEntry>>, CacheError> {
        self.entries
            .read()
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, StoredEntry>>, CacheError> {
        self.entries
            .write()
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entry(key)?.map(|e| e.value))
    }

    fn set(&self, key: &str, value: &str, options: &SetOptions) -> Result<(), CacheError> {
        let entry = StoredEntry::new(value, options, Utc::now())?;
        self.write()?.insert(key.to_string(), entry);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.write()?.remove(key);
        Ok(())
    }
}
