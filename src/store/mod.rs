//! Storage collaborators
//!
//! The coupon flow only needs a handful of operations from persistence; they
//! are expressed as traits so the service can run against PostgreSQL in
//! production and the in-memory store in tests and local development.

use async_trait::async_trait;
use thiserror::Error;
use crate::domain::aggregates::{CartSnapshot, Coupon, PageWindow, WishlistEntry, WishlistPage};
use crate::domain::value_objects::{CartId, CouponCode, ProductId, UserId};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Product {0} already in wishlist")]
    DuplicateWishlistEntry(ProductId),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load_cart(&self, user: UserId) -> StoreResult<Option<CartSnapshot>>;

    /// Sets the cart's coupon only if it has none. Returns `false` when a
    /// coupon was already attached, so concurrent applies cannot both win.
    async fn attach_coupon(&self, cart: CartId, code: &CouponCode) -> StoreResult<bool>;

    /// Clears the cart's coupon, returning the code that was attached.
    async fn clear_coupon(&self, cart: CartId) -> StoreResult<Option<CouponCode>>;
}

#[async_trait]
pub trait CouponStore: Send + Sync {
    async fn find_by_code(&self, code: &CouponCode) -> StoreResult<Option<Coupon>>;
}

#[async_trait]
pub trait WishlistStore: Send + Sync {
    async fn list(&self, user: UserId, window: PageWindow) -> StoreResult<WishlistPage>;
    async fn add(&self, user: UserId, product: ProductId) -> StoreResult<WishlistEntry>;
    /// Returns whether an entry was removed.
    async fn remove(&self, user: UserId, product: ProductId) -> StoreResult<bool>;
}
