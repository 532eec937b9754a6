//! Wishlist module.
//!
//! Contains the wishlist aggregate and the transfer-to-cart flow.

mod transfer;
mod wishlist;

pub use transfer::TransferReport;
pub use wishlist::{Wishlist, WishlistItem};
