//! Moving wishlist entries into the cart.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::wishlist::Wishlist;
use serde::{Deserialize, Serialize};

/// What a transfer did with each selected id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferReport {
    /// Added to the cart and removed from the wishlist.
    pub moved: Vec<ProductId>,
    /// Saved but out of stock; left in the wishlist.
    pub out_of_stock: Vec<ProductId>,
    /// Not in the wishlist (never saved, or moved by an earlier attempt).
    pub not_found: Vec<ProductId>,
}

impl TransferReport {
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }
}

impl Wishlist {
    /// Move the selected in-stock entries into the cart.
    ///
    /// Each moved entry is added to the cart with quantity 1 and removed
    /// from the wishlist. The cart is staged on a copy first, so if any
    /// addition fails neither the cart nor the wishlist changes. Running the
    /// same transfer again is a no-op for ids already moved.
    pub fn transfer_to_cart(
        &mut self,
        cart: &mut Cart,
        selected: &[ProductId],
    ) -> Result<TransferReport, CommerceError> {
        let mut report = TransferReport::default();
        let mut staged = cart.clone();

        for id in selected {
            if report.moved.contains(id) {
                continue;
            }
            match self.get(id) {
                None => report.not_found.push(id.clone()),
                Some(item) if !item.in_stock => report.out_of_stock.push(id.clone()),
                Some(item) => {
                    staged.add_one(item.product.clone())?;
                    report.moved.push(id.clone());
                }
            }
        }

        *cart = staged;
        for id in &report.moved {
            self.remove(id);
        }

        tracing::debug!(
            moved = report.moved.len(),
            out_of_stock = report.out_of_stock.len(),
            not_found = report.not_found.len(),
            "wishlist transferred to cart"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MAX_QUANTITY_PER_ITEM;
    use crate::catalog::ProductSummary;
    use crate::money::{Currency, Money};
    use crate::wishlist::WishlistItem;

    fn summary(id: &str) -> ProductSummary {
        ProductSummary::new(id, id, Money::new(2500, Currency::USD))
    }

    fn wishlist() -> Wishlist {
        let mut wishlist = Wishlist::new();
        wishlist.add(WishlistItem::new(summary("1"), true));
        wishlist.add(WishlistItem::new(summary("2"), false));
        wishlist.add(WishlistItem::new(summary("3"), true));
        wishlist
    }

    fn ids(raw: &[&str]) -> Vec<ProductId> {
        raw.iter().map(|s| ProductId::new(*s)).collect()
    }

    #[test]
    fn test_only_in_stock_selected_items_move() {
        let mut wishlist = wishlist();
        let mut cart = Cart::new();

        let report = wishlist
            .transfer_to_cart(&mut cart, &ids(&["1", "2"]))
            .unwrap();

        assert_eq!(report.moved, ids(&["1"]));
        assert_eq!(report.out_of_stock, ids(&["2"]));
        assert_eq!(cart.unique_item_count(), 1);
        assert!(cart.get_item(&ProductId::new("1")).is_some());

        // Out of stock and unselected entries stay put.
        assert!(wishlist.contains(&ProductId::new("2")));
        assert!(wishlist.contains(&ProductId::new("3")));
        assert!(!wishlist.contains(&ProductId::new("1")));
    }

    #[test]
    fn test_transfer_merges_into_existing_line() {
        let mut wishlist = wishlist();
        let mut cart = Cart::new();
        cart.add_one(summary("1")).unwrap();

        wishlist.transfer_to_cart(&mut cart, &ids(&["1"])).unwrap();
        assert_eq!(cart.get_item(&ProductId::new("1")).unwrap().quantity, 2);
    }

    #[test]
    fn test_retry_is_idempotent() {
        let mut wishlist = wishlist();
        let mut cart = Cart::new();
        let selected = ids(&["1", "3"]);

        wishlist.transfer_to_cart(&mut cart, &selected).unwrap();
        let retry = wishlist.transfer_to_cart(&mut cart, &selected).unwrap();

        assert!(retry.moved.is_empty());
        assert_eq!(retry.not_found, selected);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_failure_leaves_both_untouched() {
        let mut wishlist = wishlist();
        let mut cart = Cart::new();
        cart.add_item(summary("3"), MAX_QUANTITY_PER_ITEM).unwrap();
        let cart_before = cart.clone();
        let wishlist_before = wishlist.clone();

        let result = wishlist.transfer_to_cart(&mut cart, &ids(&["1", "3"]));

        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(..))));
        assert_eq!(cart, cart_before);
        assert_eq!(wishlist, wishlist_before);
    }

    #[test]
    fn test_duplicate_selection_moves_once() {
        let mut wishlist = wishlist();
        let mut cart = Cart::new();

        let report = wishlist
            .transfer_to_cart(&mut cart, &ids(&["1", "1"]))
            .unwrap();
        assert_eq!(report.moved_count(), 1);
        assert_eq!(cart.item_count(), 1);
    }
}
