//! Wishlist and wishlist item types.

use crate::catalog::ProductSummary;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A saved product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistItem {
    /// The saved product.
    #[serde(flatten)]
    pub product: ProductSummary,
    /// Whether the product could be bought when it was saved.
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

impl WishlistItem {
    pub fn new(product: ProductSummary, in_stock: bool) -> Self {
        Self { product, in_stock }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }
}

/// Saved products with set semantics on product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "WishlistRecord")]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

#[derive(Deserialize)]
struct WishlistRecord {
    items: Vec<WishlistItem>,
}

impl TryFrom<WishlistRecord> for Wishlist {
    type Error = CommerceError;

    fn try_from(record: WishlistRecord) -> Result<Self, Self::Error> {
        let mut wishlist = Wishlist::new();
        for item in record.items {
            let id = item.id().to_string();
            if !wishlist.add(item) {
                return Err(CommerceError::DuplicateItem(id));
            }
        }
        Ok(wishlist)
    }
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save an item.
    ///
    /// Returns `false` and changes nothing when the id is already saved.
    pub fn add(&mut self, item: WishlistItem) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        tracing::debug!(product_id = %item.id(), "wishlist item added");
        self.items.push(item);
        true
    }

    /// Remove an item. Returns `false` when it was not saved.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id() != id);
        let removed = self.items.len() < len_before;
        if removed {
            tracing::debug!(product_id = %id, "wishlist item removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|i| i.id() == id)
    }

    pub fn get(&self, id: &ProductId) -> Option<&WishlistItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected ids that are saved and in stock, in selection order.
    pub fn available_selection<'a>(&self, selected: &'a [ProductId]) -> Vec<&'a ProductId> {
        selected
            .iter()
            .filter(|id| self.get(id).is_some_and(|item| item.in_stock))
            .collect()
    }
}
