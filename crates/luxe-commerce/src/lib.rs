//! Cart, wishlist, catalog and pricing types for the LUXE storefront.
//!
//! This crate holds the pure state of the storefront:
//!
//! - **Catalog**: the read-only fragrance collection
//! - **Cart**: line items, quantity changes, promo codes, pricing
//! - **Wishlist**: saved items and the transfer-to-cart flow
//!
//! Nothing in here performs I/O. Persistence lives in `luxe-cache` and the
//! wiring of both lives in `luxe-storefront`.
//!
//! # Example
//!
//! ```rust
//! use luxe_commerce::prelude::*;
//!
//! let catalog = Catalog::luxe_collection().unwrap();
//! let gold = catalog.find(&ProductId::new("4")).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_one(gold.summary()).unwrap();
//!
//! let mut promo = PromoState::default();
//! promo.apply_code("luxe10", &PromoCatalog::default()).unwrap();
//!
//! let pricing = cart
//!     .calculate_pricing(&promo, &ShippingPolicy::default())
//!     .unwrap();
//! assert_eq!(pricing.grand_total.display(), "$359.10");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product, ProductSummary};

    // Cart
    pub use crate::cart::{
        price_items, Cart, CartPricing, DiscountRate, LineItem, LineItemPricing, PromoCatalog,
        PromoCode, PromoState, QuantityChange, ShippingPolicy,
    };

    // Wishlist
    pub use crate::wishlist::{TransferReport, Wishlist, WishlistItem};
}
