//! Application services
//!
//! Orchestrate stores, evaluation and event publishing for the HTTP layer.

use thiserror::Error;
use crate::domain::evaluator::CouponError;
use crate::domain::value_objects::ProductId;
use crate::store::StoreError;

pub mod coupon;
pub mod wishlist;

pub use coupon::CouponService;
pub use wishlist::WishlistService;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error("Cart not found")]
    CartNotFound,

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Product {0} already in wishlist")]
    AlreadyInWishlist(ProductId),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ProductNotFound(id) => Self::ProductNotFound(id),
            StoreError::DuplicateWishlistEntry(id) => Self::AlreadyInWishlist(id),
            other => Self::Storage(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
