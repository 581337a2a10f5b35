//! In-memory store for tests and local development.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CartStore, CouponStore, StoreError, StoreResult, WishlistStore};
use crate::domain::aggregates::{CartSnapshot, Coupon, PageWindow, WishlistEntry, WishlistPage};
use crate::domain::value_objects::{CartId, CouponCode, ProductId, UserId};

/// Holds carts, coupons and wishlists behind async locks.
///
/// When a product catalog is registered, wishlist additions are checked
/// against it; an empty catalog accepts any product.
#[derive(Default)]
pub struct InMemoryStore {
    carts: RwLock<HashMap<CartId, CartSnapshot>>,
    coupons: RwLock<HashMap<CouponCode, Coupon>>,
    wishlists: RwLock<Vec<WishlistEntry>>,
    products: RwLock<HashSet<ProductId>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_cart(&self, cart: CartSnapshot) {
        self.carts.write().await.insert(cart.id(), cart);
    }

    pub async fn insert_coupon(&self, coupon: Coupon) {
        self.coupons.write().await.insert(coupon.code.clone(), coupon);
    }

    pub async fn insert_product(&self, product: ProductId) {
        self.products.write().await.insert(product);
    }

    pub async fn cart(&self, id: CartId) -> Option<CartSnapshot> {
        self.carts.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl CartStore for InMemoryStore {
    async fn load_cart(&self, user: UserId) -> StoreResult<Option<CartSnapshot>> {
        Ok(self.carts.read().await.values().find(|c| c.user_id() == user).cloned())
    }

    async fn attach_coupon(&self, cart: CartId, code: &CouponCode) -> StoreResult<bool> {
        let mut carts = self.carts.write().await;
        match carts.get_mut(&cart) {
            Some(cart) => Ok(cart.attach_coupon(code.clone()).is_ok()),
            None => Ok(false),
        }
    }

    async fn clear_coupon(&self, cart: CartId) -> StoreResult<Option<CouponCode>> {
        Ok(self.carts.write().await.get_mut(&cart).and_then(CartSnapshot::clear_coupon))
    }
}

#[async_trait]
impl CouponStore for InMemoryStore {
    async fn find_by_code(&self, code: &CouponCode) -> StoreResult<Option<Coupon>> {
        Ok(self.coupons.read().await.get(code).cloned())
    }
}

#[async_trait]
impl WishlistStore for InMemoryStore {
    async fn list(&self, user: UserId, window: PageWindow) -> StoreResult<WishlistPage> {
        let wishlists = self.wishlists.read().await;
        let mine: Vec<&WishlistEntry> = wishlists.iter().filter(|e| e.user_id == user).collect();
        Ok(WishlistPage {
            count: mine.len() as u64,
            results: mine.into_iter().skip(window.offset as usize).take(window.limit as usize).cloned().collect(),
        })
    }

    async fn add(&self, user: UserId, product: ProductId) -> StoreResult<WishlistEntry> {
        {
            let products = self.products.read().await;
            if !products.is_empty() && !products.contains(&product) {
                return Err(StoreError::ProductNotFound(product));
            }
        }
        let mut wishlists = self.wishlists.write().await;
        if wishlists.iter().any(|e| e.user_id == user && e.product_id == product) {
            return Err(StoreError::DuplicateWishlistEntry(product));
        }
        let entry = WishlistEntry::new(user, product);
        wishlists.push(entry.clone());
        Ok(entry)
    }

    async fn remove(&self, user: UserId, product: ProductId) -> StoreResult<bool> {
        let mut wishlists = self.wishlists.write().await;
        let before = wishlists.len();
        wishlists.retain(|e| !(e.user_id == user && e.product_id == product));
        Ok(wishlists.len() != before)
    }
}
