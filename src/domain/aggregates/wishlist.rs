//! Wishlist entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{ProductId, UserId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

impl WishlistEntry {
    pub fn new(user_id: UserId, product_id: ProductId) -> Self {
        Self { user_id, product_id, created_at: Utc::now() }
    }
}

/// One page of a customer's wishlist
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WishlistPage {
    pub count: u64,
    pub results: Vec<WishlistEntry>,
}

/// Limit/offset window, clamped to sane bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow { pub limit: u32, pub offset: u32 }

impl PageWindow {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT);
        Self { limit, offset: offset.unwrap_or(0) }
    }
}

impl Default for PageWindow { fn default() -> Self { Self::new(None, None) } }
