//! Domain events
use crate::domain::value_objects::{CartId, CouponCode, ProductId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainEvent {
    Coupon(CouponEvent),
    Wishlist(WishlistEvent),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponEvent {
    Applied { cart_id: CartId, user_id: UserId, code: CouponCode, discount_value: Decimal },
    Removed { cart_id: CartId, user_id: UserId, code: Option<CouponCode> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WishlistEvent {
    ProductAdded { user_id: UserId, product_id: ProductId },
    ProductRemoved { user_id: UserId, product_id: ProductId },
}

impl DomainEvent {
    /// Message subject, e.g. `ecommerce.coupon.applied`
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Coupon(CouponEvent::Applied { .. }) => "ecommerce.coupon.applied",
            Self::Coupon(CouponEvent::Removed { .. }) => "ecommerce.coupon.removed",
            Self::Wishlist(WishlistEvent::ProductAdded { .. }) => "ecommerce.wishlist.product_added",
            Self::Wishlist(WishlistEvent::ProductRemoved { .. }) => "ecommerce.wishlist.product_removed",
        }
    }
}

impl From<CouponEvent> for DomainEvent { fn from(e: CouponEvent) -> Self { Self::Coupon(e) } }
impl From<WishlistEvent> for DomainEvent { fn from(e: WishlistEvent) -> Self { Self::Wishlist(e) } }
