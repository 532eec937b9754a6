//! The storefront service object.

use luxe_auth::{AccessToken, AuthResponse, TokenHolder};
use luxe_cache::{Cache, KeyValueStore, PersistedSlot};
use luxe_commerce::cart::{
    Cart, CartPricing, DiscountRate, PromoCatalog, PromoState, ShippingPolicy,
};
use luxe_commerce::wishlist::{TransferReport, Wishlist};
use luxe_commerce::ProductId;

use crate::checkout::{simulate_checkout, CheckoutDecision, CheckoutError};
use crate::clock::{Clock, SystemClock};
use crate::loading::LoadingSequencer;
use crate::{StorefrontConfig, StorefrontError};

/// Storage key for the cart envelope.
pub const CART_KEY: &str = "cart-storage";
/// Storage key for the wishlist envelope.
pub const WISHLIST_KEY: &str = "wishlist-storage";
/// Storage key for the applied promo code.
pub const PROMO_KEY: &str = "promo-storage";

/// Cart, wishlist, promo, auth and loading state for one shopper.
///
/// Mutations only touch memory. Call [`Storefront::save`] to persist the
/// cart, wishlist and promo; the access token is written through as soon as
/// it changes.
///
/// # Example
///
/// ```rust,ignore
/// let store = FileStore::open(".luxe")?;
/// let mut storefront = Storefront::load(store, StorefrontConfig::default())?;
/// storefront.cart_mut().add_one(product.summary())?;
/// storefront.save()?;
/// ```
#[derive(Debug)]
pub struct Storefront<S, C = SystemClock> {
    config: StorefrontConfig,
    cache: Cache<S>,
    cart_slot: PersistedSlot<Cart>,
    wishlist_slot: PersistedSlot<Wishlist>,
    promo_slot: PersistedSlot<PromoState>,
    cart: Cart,
    wishlist: Wishlist,
    promo: PromoState,
    promo_catalog: PromoCatalog,
    shipping: ShippingPolicy,
    auth: TokenHolder<S>,
    loading: LoadingSequencer<C>,
}

impl<S: KeyValueStore + Clone> Storefront<S, SystemClock> {
    /// Rehydrate a storefront from `store`.
    pub fn load(store: S, config: StorefrontConfig) -> Result<Self, StorefrontError> {
        Self::load_with_clock(store, config, SystemClock)
    }
}

impl<S: KeyValueStore + Clone, C: Clock> Storefront<S, C> {
    /// Rehydrate a storefront, timing the loading sequence with `clock`.
    ///
    /// Missing or unreadable persisted state starts empty. An invalid
    /// `config` is an error.
    pub fn load_with_clock(
        store: S,
        config: StorefrontConfig,
        clock: C,
    ) -> Result<Self, StorefrontError> {
        config.validate()?;
        let shipping = config.shipping_policy()?;
        let promo_catalog = config.promo_catalog();
        let auth = TokenHolder::with_expiry_days(store.clone(), config.auth.token_expiry_days);
        let loading = LoadingSequencer::with_clock(clock, config.loading_schedule());

        let cache = Cache::new(store);
        let cart_slot = PersistedSlot::<Cart>::new(CART_KEY);
        let wishlist_slot = PersistedSlot::<Wishlist>::new(WISHLIST_KEY);
        let promo_slot = PersistedSlot::<PromoState>::new(PROMO_KEY);

        let cart = cart_slot.load(&cache);
        let wishlist = wishlist_slot.load(&cache);
        let promo = promo_slot.load(&cache);

        tracing::debug!(
            cart_items = cart.unique_item_count(),
            wishlist_items = wishlist.len(),
            authenticated = auth.is_authenticated(),
            "storefront loaded"
        );

        Ok(Self {
            config,
            cache,
            cart_slot,
            wishlist_slot,
            promo_slot,
            cart,
            wishlist,
            promo,
            promo_catalog,
            shipping,
            auth,
            loading,
        })
    }

    /// Persist cart, wishlist and promo.
    pub fn save(&self) -> Result<(), StorefrontError> {
        self.cart_slot.save(&self.cache, &self.cart)?;
        self.wishlist_slot.save(&self.cache, &self.wishlist)?;
        self.promo_slot.save(&self.cache, &self.promo)?;
        Ok(())
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut Wishlist {
        &mut self.wishlist
    }

    pub fn promo(&self) -> &PromoState {
        &self.promo
    }

    pub fn promo_catalog(&self) -> &PromoCatalog {
        &self.promo_catalog
    }

    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.shipping
    }

    pub fn auth(&self) -> &TokenHolder<S> {
        &self.auth
    }

    pub fn loading(&self) -> &LoadingSequencer<C> {
        &self.loading
    }

    pub fn loading_mut(&mut self) -> &mut LoadingSequencer<C> {
        &mut self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Apply a promo code against the configured catalog.
    pub fn apply_promo(&mut self, code: &str) -> Result<DiscountRate, StorefrontError> {
        Ok(self.promo.apply_code(code, &self.promo_catalog)?)
    }

    /// Drop the applied promo code.
    pub fn clear_promo(&mut self) {
        self.promo.clear();
    }

    /// Current pricing of the cart.
    pub fn pricing(&self) -> Result<CartPricing, StorefrontError> {
        Ok(self.cart.calculate_pricing(&self.promo, &self.shipping)?)
    }

    /// Move selected in-stock wishlist entries into the cart.
    pub fn move_to_cart(&mut self, selected: &[ProductId]) -> Result<TransferReport, StorefrontError> {
        let report = self.wishlist.transfer_to_cart(&mut self.cart, selected)?;
        tracing::info!(moved = report.moved_count(), "moved wishlist items to cart");
        Ok(report)
    }

    /// Store a token, signing the shopper in.
    pub fn login(&mut self, token: AccessToken) -> Result<(), StorefrontError> {
        self.auth.set_access_token(token)?;
        Ok(())
    }

    /// Apply a login or signup endpoint response.
    pub fn apply_auth_response(
        &mut self,
        ok: bool,
        response: &AuthResponse,
    ) -> Result<AccessToken, StorefrontError> {
        Ok(self.auth.apply_response(ok, response)?)
    }

    /// Re-read the token from storage.
    pub fn refresh_auth(&mut self) {
        self.auth.refresh_auth();
    }

    /// Clear the token, the cart and the wishlist, then persist.
    pub fn logout(&mut self) -> Result<(), StorefrontError> {
        self.auth.clear_access_token()?;
        self.cart.clear();
        self.wishlist.clear();
        self.save()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Decide whether checkout may start.
    ///
    /// Signed-out shoppers are sent to login before the cart is looked at.
    pub fn checkout(&self) -> Result<CheckoutDecision, StorefrontError> {
        if !self.auth.is_authenticated() {
            tracing::info!("checkout requires login");
            return Ok(CheckoutDecision::LoginRequired);
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        Ok(CheckoutDecision::Proceed(self.pricing()?))
    }

    /// Run [`Storefront::checkout`] and, if it may proceed, wait out the
    /// configured processing delay.
    pub async fn process_checkout(&self) -> Result<CheckoutDecision, StorefrontError> {
        match self.checkout()? {
            CheckoutDecision::Proceed(pricing) => {
                let pricing = simulate_checkout(pricing, self.config.checkout_delay()).await;
                Ok(CheckoutDecision::Proceed(pricing))
            }
            decision => Ok(decision),
        }
    }
}
