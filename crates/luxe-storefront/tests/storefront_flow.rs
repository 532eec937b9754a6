//! End-to-end flows across the commerce, cache, auth and storefront crates.

use std::sync::Arc;
use std::time::Duration;

use luxe_auth::{AccessToken, AuthResponse, TOKEN_KEY};
use luxe_cache::{FileStore, KeyValueStore, MemoryStore, SetOptions};
use luxe_commerce::prelude::*;
use luxe_storefront::{
    CheckoutDecision, ManualClock, Storefront, StorefrontConfig, CART_KEY, WISHLIST_KEY,
};

fn catalog() -> Catalog {
    Catalog::luxe_collection().unwrap()
}

fn summary(id: &str) -> ProductSummary {
    catalog().find(&ProductId::new(id)).unwrap().summary()
}

fn usd(dollars: f64) -> Money {
    Money::from_decimal(dollars, Currency::USD)
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn cart_and_wishlist_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut sf = Storefront::load(store, StorefrontConfig::default()).unwrap();
        for _ in 0..3 {
            sf.cart_mut().add_one(summary("1")).unwrap();
        }
        let gold = catalog().find(&ProductId::new("4")).unwrap().wishlist_item();
        assert!(sf.wishlist_mut().add(gold.clone()));
        assert!(!sf.wishlist_mut().add(gold));
        sf.save().unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let sf = Storefront::load(store, StorefrontConfig::default()).unwrap();

    assert_eq!(sf.cart().unique_item_count(), 1);
    assert_eq!(sf.cart().get_item(&ProductId::new("1")).unwrap().quantity, 3);
    assert_eq!(sf.wishlist().len(), 1);
    assert!(sf.wishlist().contains(&ProductId::new("4")));
}

#[test]
fn persisted_envelope_shape() {
    let store = Arc::new(MemoryStore::new());
    let mut sf = Storefront::load(store.clone(), StorefrontConfig::default()).unwrap();
    sf.cart_mut().add_item(summary("2"), 2).unwrap();
    sf.save().unwrap();

    let raw: serde_json::Value = serde_json::from_str(&store.get(CART_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(raw["version"], 0);
    assert_eq!(raw["state"]["items"][0]["id"], "2");
    assert_eq!(raw["state"]["items"][0]["quantity"], 2);

    let raw: serde_json::Value =
        serde_json::from_str(&store.get(WISHLIST_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(raw["state"]["items"], serde_json::json!([]));
}

#[test]
fn corrupt_state_starts_empty() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(CART_KEY, "{\"state\": 42", &SetOptions::default())
        .unwrap();
    store
        .set(
            WISHLIST_KEY,
            r#"{"state":{"items":[]},"version":9}"#,
            &SetOptions::default(),
        )
        .unwrap();

    let sf = Storefront::load(store, StorefrontConfig::default()).unwrap();
    assert!(sf.cart().is_empty());
    assert!(sf.wishlist().is_empty());
}

#[test]
fn invalid_stored_items_start_empty() {
    let line = |id: &str, price_cents: i64, quantity: u32| {
        let mut product = summary(id);
        product.price = Money::new(price_cents, Currency::USD);
        serde_json::to_value(LineItem { product, quantity }).unwrap()
    };
    let cart = serde_json::json!({
        "state": { "items": [line("1", 29900, 0), line("1", 29900, 2), line("2", -9000, 1)] },
        "version": 0,
    });
    let saved = catalog().find(&ProductId::new("1")).unwrap().wishlist_item();
    let saved = serde_json::to_value(saved).unwrap();
    let wishlist = serde_json::json!({
        "state": { "items": [saved.clone(), saved] },
        "version": 0,
    });

    let store = Arc::new(MemoryStore::new());
    store.set(CART_KEY, &cart.to_string(), &SetOptions::default()).unwrap();
    store.set(WISHLIST_KEY, &wishlist.to_string(), &SetOptions::default()).unwrap();

    let sf = Storefront::load_with_clock(store, StorefrontConfig::default(), ManualClock::new())
        .unwrap();
    assert!(sf.cart().is_empty());
    assert!(sf.wishlist().is_empty());
    assert!(sf.pricing().is_ok());
}

#[test]
fn unusable_config_is_rejected_before_login() {
    let mut config = StorefrontConfig::default();
    config.auth.token_expiry_days = 1_000_000_000;
    assert!(Storefront::load(Arc::new(MemoryStore::new()), config).is_err());

    let mut config = StorefrontConfig::default();
    config.currency = Currency::EUR;
    assert!(Storefront::load(Arc::new(MemoryStore::new()), config).is_err());
}

// ============================================================================
// Pricing
// ============================================================================

#[test]
fn gold_with_luxe10() {
    let mut sf = Storefront::load(Arc::new(MemoryStore::new()), StorefrontConfig::default()).unwrap();
    sf.cart_mut().add_one(summary("4")).unwrap();
    sf.apply_promo("luxe10").unwrap();

    let pricing = sf.pricing().unwrap();
    assert_eq!(pricing.subtotal, usd(399.0));
    assert_eq!(pricing.discount_total, usd(39.9));
    assert!(pricing.has_free_shipping());
    assert_eq!(pricing.grand_total, usd(359.1));
}

#[test]
fn configured_shipping_rules() {
    let config: StorefrontConfig = toml::from_str(
        r#"
        [shipping]
        free_shipping_threshold = 500.0
        flat_fee = 25.0
        "#,
    )
    .unwrap();
    let mut sf = Storefront::load(Arc::new(MemoryStore::new()), config).unwrap();
    sf.cart_mut().add_one(summary("4")).unwrap();

    let pricing = sf.pricing().unwrap();
    assert_eq!(pricing.shipping_total, usd(25.0));
    assert_eq!(pricing.grand_total, usd(424.0));
    assert_eq!(pricing.until_free_shipping, usd(101.01));
}

// ============================================================================
// Wishlist transfer
// ============================================================================

#[test]
fn move_to_cart_moves_only_in_stock_selection() {
    let mut sf = Storefront::load(Arc::new(MemoryStore::new()), StorefrontConfig::default()).unwrap();
    sf.wishlist_mut().add(WishlistItem::new(summary("1"), true));
    sf.wishlist_mut().add(WishlistItem::new(summary("2"), false));
    sf.wishlist_mut().add(WishlistItem::new(summary("3"), true));

    let selected = [ProductId::new("1"), ProductId::new("2")];
    let report = sf.move_to_cart(&selected).unwrap();

    assert_eq!(report.moved, vec![ProductId::new("1")]);
    assert_eq!(report.out_of_stock, vec![ProductId::new("2")]);
    assert_eq!(sf.cart().unique_item_count(), 1);
    assert_eq!(sf.wishlist().len(), 2);
    assert!(sf.wishlist().contains(&ProductId::new("3")));

    // Retrying moves nothing new.
    let again = sf.move_to_cart(&selected).unwrap();
    assert_eq!(again.moved_count(), 0);
    assert_eq!(sf.cart().item_count(), 1);
}

// ============================================================================
// Auth and checkout
// ============================================================================

#[test]
fn login_response_then_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let mut sf = Storefront::load(store, StorefrontConfig::default()).unwrap();
    sf.cart_mut().add_item(summary("1"), 1).unwrap();

    assert!(sf.checkout().unwrap().is_login_required());

    let rejected = sf.apply_auth_response(false, &AuthResponse::default());
    assert!(rejected.is_err());
    assert!(sf.checkout().unwrap().is_login_required());

    let response = AuthResponse::from_json(r#"{"accessToken":"tok-123","message":"ok"}"#).unwrap();
    sf.apply_auth_response(true, &response).unwrap();

    match sf.checkout().unwrap() {
        CheckoutDecision::Proceed(pricing) => assert_eq!(pricing.grand_total, usd(299.0)),
        other => panic!("expected Proceed, got {:?}", other),
    }

    // The token is visible to a second process.
    let other = Storefront::load(FileStore::open(dir.path()).unwrap(), StorefrontConfig::default())
        .unwrap();
    assert!(other.is_authenticated());
}

#[test]
fn logout_wipes_shared_store() {
    let store = Arc::new(MemoryStore::new());
    let mut sf = Storefront::load(store.clone(), StorefrontConfig::default()).unwrap();
    sf.login(AccessToken::new("abc").unwrap()).unwrap();
    sf.cart_mut().add_one(summary("1")).unwrap();
    sf.save().unwrap();

    sf.logout().unwrap();

    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    let reloaded = Storefront::load(store, StorefrontConfig::default()).unwrap();
    assert!(reloaded.cart().is_empty());
    assert!(!reloaded.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn process_checkout_waits_configured_delay() {
    let mut config = StorefrontConfig::default();
    config.checkout.delay_ms = 500;

    let mut sf = Storefront::load(Arc::new(MemoryStore::new()), config).unwrap();
    sf.login(AccessToken::new("abc").unwrap()).unwrap();
    sf.cart_mut().add_one(summary("6")).unwrap();

    let start = tokio::time::Instant::now();
    let decision = sf.process_checkout().await.unwrap();

    assert!(matches!(decision, CheckoutDecision::Proceed(_)));
    assert!(start.elapsed() >= Duration::from_millis(500));
}

// ============================================================================
// Loading sequence
// ============================================================================

#[test]
fn splash_plays_once_per_session() {
    let clock = ManualClock::new();
    let mut sf = Storefront::load_with_clock(
        Arc::new(MemoryStore::new()),
        StorefrontConfig::default(),
        clock.clone(),
    )
    .unwrap();

    assert!(sf.loading_mut().start().is_some());
    clock.advance(Duration::from_secs(5));
    sf.loading_mut().poll();
    assert_eq!(sf.loading().state().progress, 100);
    assert!(sf.loading().state().is_loading);

    clock.advance(Duration::from_secs(2));
    sf.loading_mut().poll();
    assert!(sf.loading().state().has_initially_loaded);
    assert!(!sf.loading().state().is_loading);

    assert!(sf.loading_mut().start().is_none());
    assert!(!sf.loading().state().is_loading);
}
