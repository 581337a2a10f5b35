//! Cart Aggregate
//!
//! A read-mostly snapshot of a customer's cart as loaded from storage. The
//! only mutation the coupon flow performs is attaching or clearing the
//! coupon reference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use crate::domain::value_objects::{CartId, CouponCode, ProductId, Quantity, UserId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    id: CartId,
    user_id: UserId,
    total_price: Decimal,
    tax: Decimal,
    coupon: Option<CouponCode>,
    lines: Vec<CartLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Unit price already net of item-level promotions
    pub unit_price: Decimal,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn new(product_id: ProductId, unit_price: Decimal, quantity: Quantity) -> Self {
        Self { product_id, unit_price, quantity }
    }
    pub fn line_total(&self) -> Decimal { self.unit_price * self.quantity.as_decimal() }
}

impl CartSnapshot {
    /// Builds a snapshot whose total is the sum of its line totals.
    pub fn new(id: CartId, user_id: UserId, tax: Decimal, lines: Vec<CartLine>) -> Self {
        let total_price = lines.iter().map(CartLine::line_total).sum();
        Self { id, user_id, total_price, tax, coupon: None, lines }
    }

    pub fn for_user(user_id: UserId) -> Self { Self::new(CartId::new(), user_id, Decimal::ZERO, vec![]) }

    /// Overrides the computed total, for carts priced by an upstream calculator.
    pub fn with_total_price(mut self, total_price: Decimal) -> Self { self.total_price = total_price; self }
    pub fn with_coupon(mut self, coupon: Option<CouponCode>) -> Self { self.coupon = coupon; self }

    pub fn id(&self) -> CartId { self.id }
    pub fn user_id(&self) -> UserId { self.user_id }
    pub fn total_price(&self) -> Decimal { self.total_price }
    pub fn tax(&self) -> Decimal { self.tax }
    pub fn coupon(&self) -> Option<&CouponCode> { self.coupon.as_ref() }
    pub fn has_coupon(&self) -> bool { self.coupon.is_some() }
    pub fn lines(&self) -> &[CartLine] { &self.lines }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn product_ids(&self) -> HashSet<ProductId> { self.lines.iter().map(|l| l.product_id).collect() }

    pub fn attach_coupon(&mut self, code: CouponCode) -> Result<(), CartError> {
        if self.coupon.is_some() { return Err(CartError::CouponAlreadyAttached); }
        self.coupon = Some(code);
        Ok(())
    }

    pub fn clear_coupon(&mut self) -> Option<CouponCode> { self.coupon.take() }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CartError { CouponAlreadyAttached }
impl std::error::Error for CartError {}
impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Coupon already attached") }
}
