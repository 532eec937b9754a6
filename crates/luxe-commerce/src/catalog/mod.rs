//! Product catalog module.
//!
//! The catalog is static data: it is loaded once and only read.

mod product;

pub use product::{Product, ProductSummary};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

const LUXE_COLLECTION: &str = include_str!("../../data/luxe_collection.json");

/// Currency the bundled collection is priced in.
pub const LUXE_COLLECTION_CURRENCY: Currency = Currency::USD;

/// Read-only list of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        if let Some(bad) = products.iter().find(|p| p.price.is_negative()) {
            return Err(CommerceError::NegativePrice(bad.id.to_string()));
        }
        Ok(Self { products })
    }

    /// The bundled LUXE collection.
    pub fn luxe_collection() -> Result<Self, CommerceError> {
        Self::from_json(LUXE_COLLECTION)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Find a product by id, failing with `ProductNotFound`.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products in a category (case-insensitive).
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
