//! Product and product reference types.

use crate::ids::ProductId;
use crate::money::Money;
use crate::wishlist::WishlistItem;
use serde::{Deserialize, Serialize};

/// A fragrance in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current unit price.
    pub price: Money,
    /// Price before markdown, shown struck through.
    #[serde(default)]
    pub original_price: Option<Money>,
    /// Primary image path.
    pub image: String,
    /// Gallery images.
    #[serde(default)]
    pub images: Vec<String>,
    /// Short description for listings.
    pub description: String,
    /// Scent family (e.g., "Intense", "Fresh").
    pub category: String,
    /// Concentration (e.g., "Eau de Parfum").
    pub concentration: String,
    /// Bottle size (e.g., "100ml").
    #[serde(default)]
    pub size: Option<String>,
    /// Longevity on skin.
    #[serde(default)]
    pub longevity: Option<String>,
    /// Projection.
    #[serde(default)]
    pub sillage: Option<String>,
    /// Units in stock.
    pub stock_count: u32,
    /// Average review rating (0-5).
    #[serde(default)]
    pub rating: f32,
    /// Number of reviews.
    #[serde(default)]
    pub reviews: u32,
}

impl Product {
    /// Whether the product can currently be bought.
    pub fn in_stock(&self) -> bool {
        self.stock_count > 0
    }

    /// Markdown against the original price, if any.
    pub fn savings(&self) -> Option<Money> {
        let original = self.original_price?;
        original
            .try_subtract(&self.price)
            .filter(|saved| saved.amount_cents > 0)
    }

    /// The reference carried by cart line items.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            size: self.size.clone(),
            category: Some(self.category.clone()),
        }
    }

    /// The entry stored when the product is saved to the wishlist.
    pub fn wishlist_item(&self) -> WishlistItem {
        WishlistItem::new(self.summary(), self.in_stock())
    }
}

/// Product reference shared by cart line items and wishlist entries.
///
/// `image`, `size` and `category` are opaque display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    /// Product identifier.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image path.
    #[serde(default)]
    pub image: String,
    /// Bottle size.
    #[serde(default)]
    pub size: Option<String>,
    /// Scent family.
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductSummary {
    /// Create a summary with only the fields pricing needs.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            size: None,
            category: None,
        }
    }
}
