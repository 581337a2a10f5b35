//! Coupon evaluation
//!
//! Decides whether a coupon may be applied to a cart for a given customer and
//! computes the discount. Evaluation is pure: it reads the cart and coupon,
//! never touches storage, and reports every rejection as a [`CouponError`].
//!
//! The checks run in a fixed order and the first failure wins:
//!
//! 1. the cart must exist and hold at least one line
//! 2. eligibility: a product-restricted coupon must match a cart line
//! 3. private coupons must list the customer
//! 4. the coupon must not be expired (it dies on `expire_date`)
//! 5. the eligible subtotal must reach the coupon minimum
//!
//! The discount is computed together with eligibility (step 2), before the
//! remaining checks, then capped and expressed as a percentage of the whole
//! cart total.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::aggregates::{CartSnapshot, Coupon};
use crate::domain::value_objects::UserId;

/// Outcome of a successful evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Subtotal the coupon percentage was applied to
    pub eligible_products_price: Decimal,
    /// Absolute discount, after the cap
    pub discount_value: Decimal,
    /// `discount_value` relative to the whole cart total, 0..=100
    pub discount_percent: Decimal,
    pub tax: Decimal,
    /// Cart total before discount
    pub total_price: Decimal,
}

/// Rejections of a coupon application. All of these are expected,
/// user-facing outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponError {
    #[error("Cart has no items")]
    NoItems,

    #[error("Coupon does not apply to any product in the cart")]
    InvalidProductCoupon,

    #[error("Coupon is not available to this customer")]
    InvalidCoupon,

    #[error("Coupon expired")]
    ExpiredCoupon,

    #[error("Cart does not reach the coupon minimum of {minimum}")]
    MinimumNotMet { minimum: Decimal },

    #[error("Cart already has a coupon")]
    AlreadyApplied,

    #[error("Coupon not found")]
    CouponNotFound,
}

/// Stable machine-readable error kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponErrorKind {
    NoItems,
    InvalidProductCoupon,
    InvalidCoupon,
    ExpiredCoupon,
    MinimumNotMet,
    AlreadyApplied,
    CouponNotFound,
}

/// Client-facing status category of a rejection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusCategory { NotFound, Forbidden, BadRequest }

impl CouponError {
    pub fn kind(&self) -> CouponErrorKind {
        match self {
            Self::NoItems => CouponErrorKind::NoItems,
            Self::InvalidProductCoupon => CouponErrorKind::InvalidProductCoupon,
            Self::InvalidCoupon => CouponErrorKind::InvalidCoupon,
            Self::ExpiredCoupon => CouponErrorKind::ExpiredCoupon,
            Self::MinimumNotMet { .. } => CouponErrorKind::MinimumNotMet,
            Self::AlreadyApplied => CouponErrorKind::AlreadyApplied,
            Self::CouponNotFound => CouponErrorKind::CouponNotFound,
        }
    }

    pub fn status_category(&self) -> StatusCategory {
        match self {
            Self::NoItems | Self::CouponNotFound => StatusCategory::NotFound,
            Self::AlreadyApplied => StatusCategory::BadRequest,
            Self::InvalidProductCoupon | Self::InvalidCoupon | Self::ExpiredCoupon | Self::MinimumNotMet { .. } => StatusCategory::Forbidden,
        }
    }
}

/// Evaluates `coupon` against `cart` for `user` on `today`.
///
/// `cart` is optional so that a customer without a cart is reported as
/// [`CouponError::NoItems`] like an empty one.
pub fn evaluate(cart: Option<&CartSnapshot>, user: UserId, coupon: &Coupon, today: NaiveDate) -> Result<EvaluationResult, CouponError> {
    let cart = match cart {
        Some(cart) if !cart.is_empty() => cart,
        _ => return Err(CouponError::NoItems),
    };
    let total_price = cart.total_price();

    let eligible_products_price = if coupon.is_restricted_to_products() {
        let mut eligible = cart.lines().iter().filter(|line| coupon.products.contains(&line.product_id)).peekable();
        if eligible.peek().is_none() {
            return Err(CouponError::InvalidProductCoupon);
        }
        eligible.map(|line| line.line_total()).sum::<Decimal>()
    } else {
        total_price
    };
    let mut discount_value = coupon.discount_percentage.of(eligible_products_price);

    if !coupon.is_available_to(user) {
        return Err(CouponError::InvalidCoupon);
    }

    if coupon.is_expired_on(today) {
        return Err(CouponError::ExpiredCoupon);
    }

    if coupon.has_minimum() && eligible_products_price < coupon.min_value_to_apply {
        return Err(CouponError::MinimumNotMet { minimum: coupon.min_value_to_apply });
    }

    if coupon.has_cap() && discount_value > coupon.max_discount_value {
        discount_value = coupon.max_discount_value;
    }

    let discount_percent = if total_price > Decimal::ZERO {
        discount_value / total_price * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    Ok(EvaluationResult { eligible_products_price, discount_value, discount_percent, tax: cart.tax(), total_price })
}
