//! LUXE storefront service.
//!
//! Wires the pure commerce aggregates to durable storage and the auth token,
//! and adds the pieces a host needs around them:
//!
//! - [`Storefront`]: one shopper's cart, wishlist, promo and token, loaded
//!   from and saved to a [`luxe_cache::KeyValueStore`]
//! - [`LoadingSequencer`]: the scripted splash-screen progress
//! - [`CheckoutDecision`]: the login/empty-cart gate in front of checkout
//! - [`StorefrontConfig`]: TOML or JSON settings with stock defaults
//!
//! # Example
//!
//! ```rust
//! use luxe_cache::MemoryStore;
//! use luxe_commerce::prelude::*;
//! use luxe_storefront::{CheckoutDecision, Storefront, StorefrontConfig};
//! use std::sync::Arc;
//!
//! let catalog = Catalog::luxe_collection().unwrap();
//! let store = Arc::new(MemoryStore::new());
//! let mut storefront = Storefront::load(store, StorefrontConfig::default()).unwrap();
//!
//! let gold = catalog.find(&ProductId::new("4")).unwrap();
//! storefront.cart_mut().add_one(gold.summary()).unwrap();
//! storefront.save().unwrap();
//!
//! assert_eq!(storefront.checkout().unwrap(), CheckoutDecision::LoginRequired);
//! ```

pub mod checkout;
pub mod clock;
pub mod config;
pub mod loading;
mod error;
mod storefront;

pub use checkout::{simulate_checkout, CheckoutDecision, CheckoutError};
pub use clock::{Clock, ManualClock, SystemClock, TimerHandle};
pub use config::StorefrontConfig;
pub use error::StorefrontError;
pub use loading::{LoadingPhase, LoadingSchedule, LoadingSequencer, LoadingState};
pub use storefront::{Storefront, CART_KEY, PROMO_KEY, WISHLIST_KEY};
