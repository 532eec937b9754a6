//! Cart and line item types.

use crate::cart::{price_items, CartPricing, PromoState, ShippingPolicy};
use crate::catalog::ProductSummary;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// Outcome of [`Cart::decrease_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Quantity went down and the line item remains, with this quantity.
    Decreased(u32),
    /// The line item was at quantity 1 and has been removed.
    Removed,
    /// No line item with that product id.
    NotFound,
}

/// A shopping cart.
///
/// Holds at most one line item per product id. Every mutation either applies
/// fully or returns an error and leaves the cart untouched. Deserializing
/// goes through the same checks, so stored state cannot bypass them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CartRecord")]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Wire shape of a [`Cart`] before validation.
#[derive(Deserialize)]
struct CartRecord {
    items: Vec<LineItem>,
}

impl TryFrom<CartRecord> for Cart {
    type Error = CommerceError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();
        for item in record.items {
            if cart.get_item(item.id()).is_some() {
                return Err(CommerceError::DuplicateItem(item.id().to_string()));
            }
            cart.add_item(item.product, item.quantity)?;
        }
        Ok(cart)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line item for the same product id has its quantity
    /// increased; otherwise a new line item is appended.
    ///
    /// Returns an error if:
    /// - Quantity is zero
    /// - The unit price is negative
    /// - The resulting quantity would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_item(&mut self, product: ProductSummary, quantity: u32) -> Result<u32, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if product.price.is_negative() {
            return Err(CommerceError::NegativePrice(product.id.to_string()));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let new_quantity = u64::from(existing.quantity) + u64::from(quantity);
            let new_quantity = checked_quantity(new_quantity)?;
            existing.quantity = new_quantity;
            tracing::debug!(product_id = %product.id, quantity = new_quantity, "cart quantity increased");
            return Ok(new_quantity);
        }

        let quantity = checked_quantity(u64::from(quantity))?;
        tracing::debug!(product_id = %product.id, quantity, "cart line item added");
        self.items.push(LineItem { product, quantity });
        Ok(quantity)
    }

    /// Add a single unit of a product.
    pub fn add_one(&mut self, product: ProductSummary) -> Result<u32, CommerceError> {
        self.add_item(product, 1)
    }

    /// Remove the line item for a product.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            tracing::debug!(product_id = %id, "cart line item removed");
        }
        removed
    }

    /// Set a line item's quantity to an explicit target.
    ///
    /// The caller passes the new quantity, not a delta. Returns `Ok(false)`
    /// when the product is not in the cart.
    pub fn increase_quantity(&mut self, id: &ProductId, new_quantity: u32) -> Result<bool, CommerceError> {
        if new_quantity < 1 {
            return Err(CommerceError::InvalidQuantity(new_quantity));
        }
        let new_quantity = checked_quantity(u64::from(new_quantity))?;

        match self.items.iter_mut().find(|i| &i.product.id == id) {
            Some(item) => {
                item.quantity = new_quantity;
                tracing::debug!(product_id = %id, quantity = new_quantity, "cart quantity set");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Decrement a line item's quantity by one.
    ///
    /// A line item at quantity 1 is removed rather than left at zero.
    pub fn decrease_quantity(&mut self, id: &ProductId) -> QuantityChange {
        let Some(position) = self.items.iter().position(|i| &i.product.id == id) else {
            return QuantityChange::NotFound;
        };

        let item = &mut self.items[position];
        if item.quantity > 1 {
            item.quantity -= 1;
            tracing::debug!(product_id = %id, quantity = item.quantity, "cart quantity decreased");
            QuantityChange::Decreased(item.quantity)
        } else {
            self.items.remove(position);
            tracing::debug!(product_id = %id, "cart line item removed at zero");
            QuantityChange::Removed
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line item for a product.
    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product.id == id)
    }

    /// Derive subtotal, discount, shipping and total.
    pub fn calculate_pricing(
        &self,
        promo: &PromoState,
        shipping: &ShippingPolicy,
    ) -> Result<CartPricing, CommerceError> {
        price_items(&self.items, promo.discount_rate(), shipping)
    }
}

fn checked_quantity(quantity: u64) -> Result<u32, CommerceError> {
    if quantity > u64::from(MAX_QUANTITY_PER_ITEM) {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    // Bounded by MAX_QUANTITY_PER_ITEM above.
    Ok(quantity as u32)
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// The product being purchased.
    #[serde(flatten)]
    pub product: ProductSummary,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Product id of this line.
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PromoCatalog;
    use crate::money::{Currency, Money};

    fn product(id: &str, dollars: i64) -> ProductSummary {
        ProductSummary::new(id, format!("Perfume {id}"), Money::new(dollars * 100, Currency::USD))
    }

    #[test]
    fn test_deserialize_checks_line_items() {
        let mut cart = Cart::new();
        cart.add_item(product("1", 10), 2).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(serde_json::from_str::<Cart>(&json).unwrap(), cart);

        let line = |id: &str, price: i64, quantity: u32| {
            serde_json::to_value(LineItem {
                product: ProductSummary::new(id, "Perfume", Money::new(price, Currency::USD)),
                quantity,
            })
            .unwrap()
        };
        let zero = serde_json::json!({ "items": [line("1", 1000, 0)] });
        let twice = serde_json::json!({ "items": [line("1", 1000, 1), line("1", 1000, 2)] });
        let negative = serde_json::json!({ "items": [line("2", -9000, 1)] });
        let too_many = serde_json::json!({ "items": [line("3", 1000, MAX_QUANTITY_PER_ITEM + 1)] });

        for bad in [zero, twice, negative, too_many] {
            assert!(serde_json::from_value::<Cart>(bad).is_err());
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        for _ in 0..4 {
            cart.add_one(product("1", 299)).unwrap();
        }

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.get_item(&ProductId::new("1")).unwrap().quantity, 4);
    }

    #[test]
    fn test_add_explicit_quantities_sum() {
        let mut cart = Cart::new();
        cart.add_item(product("1", 10), 2).unwrap();
        cart.add_item(product("1", 10), 3).unwrap();
        cart.add_item(product("2", 10), 1).unwrap();

        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(product("1", 10), 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut cart = Cart::new();
        let broken = ProductSummary::new("x", "Broken", Money::new(-100, Currency::USD));
        assert!(matches!(
            cart.add_one(broken),
            Err(CommerceError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_quantity_limit_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item(product("1", 10), MAX_QUANTITY_PER_ITEM).unwrap();

        let result = cart.add_one(product("1", 10));
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(10000, _))));
        assert_eq!(cart.item_count(), u64::from(MAX_QUANTITY_PER_ITEM));
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_one(product("1", 10)).unwrap();

        assert!(cart.remove_item(&ProductId::new("1")));
        assert!(!cart.remove_item(&ProductId::new("1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increase_quantity_sets_target() {
        let mut cart = Cart::new();
        cart.add_one(product("1", 10)).unwrap();

        assert!(cart.increase_quantity(&ProductId::new("1"), 2).unwrap());
        assert_eq!(cart.item_count(), 2);
        assert!(!cart.increase_quantity(&ProductId::new("nope"), 2).unwrap());
    }

    #[test]
    fn test_increase_quantity_rejects_zero() {
        let mut cart = Cart::new();
        cart.add_one(product("1", 10)).unwrap();

        assert!(cart.increase_quantity(&ProductId::new("1"), 0).is_err());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_decrease_quantity_removes_at_one() {
        let mut cart = Cart::new();
        let id = ProductId::new("1");
        cart.add_item(product("1", 10), 2).unwrap();

        assert_eq!(cart.decrease_quantity(&id), QuantityChange::Decreased(1));
        assert_eq!(cart.decrease_quantity(&id), QuantityChange::Removed);
        assert_eq!(cart.decrease_quantity(&id), QuantityChange::NotFound);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_one(product("1", 10)).unwrap();
        cart.add_one(product("2", 10)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_pricing_two_at_fifty() {
        let mut cart = Cart::new();
        cart.add_item(product("1", 50), 2).unwrap();

        let pricing = cart
            .calculate_pricing(&PromoState::default(), &ShippingPolicy::default())
            .unwrap();
        assert_eq!(pricing.subtotal.amount_cents, 10000);
        assert_eq!(pricing.discount_total.amount_cents, 0);
        assert_eq!(pricing.shipping_total.amount_cents, 1500);
        assert_eq!(pricing.grand_total.amount_cents, 11500);
    }

    #[test]
    fn test_pricing_with_promo() {
        let mut cart = Cart::new();
        cart.add_item(product("1", 60), 2).unwrap();

        let mut promo = PromoState::default();
        promo.apply_code("LUXE10", &PromoCatalog::default()).unwrap();

        let pricing = cart
            .calculate_pricing(&promo, &ShippingPolicy::default())
            .unwrap();
        assert_eq!(pricing.subtotal.amount_cents, 12000);
        assert_eq!(pricing.discount_total.amount_cents, 1200);
        assert_eq!(pricing.shipping_total.amount_cents, 0);
        assert_eq!(pricing.grand_total.amount_cents, 10800);
    }

    #[test]
    fn test_persisted_shape_is_flat() {
        let mut cart = Cart::new();
        cart.add_item(product("1", 50), 2).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["items"][0]["id"], "1");
        assert_eq!(json["items"][0]["quantity"], 2);

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }
}
