//! Durable key-value storage for the LUXE storefront.
//!
//! The storefront only needs three things from durable storage: `get`,
//! `set` with cookie-like options, and `remove`. [`KeyValueStore`] is that
//! contract; [`MemoryStore`] and [`FileStore`] implement it.
//!
//! On top sits [`Cache`], which adds JSON serialization, and
//! [`PersistedSlot`], which stores a versioned state envelope under one key.
//!
//! # Example
//!
//! ```rust
//! use luxe_cache::{Cache, MemoryStore, PersistedSlot};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, Default, PartialEq, Debug)]
//! struct Counter {
//!     clicks: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! let slot = PersistedSlot::<Counter>::new("counter-storage");
//!
//! slot.save(&cache, &Counter { clicks: 3 }).unwrap();
//! assert_eq!(slot.load(&cache), Counter { clicks: 3 });
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod persisted;
mod store;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;
pub use memory::MemoryStore;
pub use persisted::{PersistedSlot, PersistedState};
pub use store::{KeyValueStore, SameSite, SetOptions, StoredEntry};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Cache, CacheError, FileStore, KeyValueStore, MemoryStore, PersistedSlot, SameSite,
        SetOptions,
    };
}
