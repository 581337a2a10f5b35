//! Apply and remove coupons on a customer's cart.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::{ServiceError, ServiceResult};
use crate::domain::evaluator::{evaluate, CouponError};
use crate::domain::events::CouponEvent;
use crate::domain::value_objects::{CouponCode, UserId};
use crate::publisher::EventPublisher;
use crate::store::{CartStore, CouponStore};
use crate::summary::CartSummary;

#[derive(Clone)]
pub struct CouponService {
    carts: Arc<dyn CartStore>,
    coupons: Arc<dyn CouponStore>,
    events: Arc<dyn EventPublisher>,
}

impl CouponService {
    pub fn new(carts: Arc<dyn CartStore>, coupons: Arc<dyn CouponStore>, events: Arc<dyn EventPublisher>) -> Self {
        Self { carts, coupons, events }
    }

    pub async fn apply(&self, user: UserId, code: &CouponCode) -> ServiceResult<CartSummary> {
        self.apply_on(user, code, Utc::now().date_naive()).await
    }

    /// Applies `code` to the user's cart as of `today`.
    ///
    /// A cart that already carries a coupon is rejected before the coupon is
    /// even looked up. The attachment itself is a conditional write, so a
    /// concurrent apply that got there first also yields `AlreadyApplied`.
    #[tracing::instrument(skip_all, fields(user = %user, code = %code))]
    pub async fn apply_on(&self, user: UserId, code: &CouponCode, today: NaiveDate) -> ServiceResult<CartSummary> {
        let cart = self.carts.load_cart(user).await?;
        if cart.as_ref().is_some_and(|c| c.has_coupon()) {
            return Err(CouponError::AlreadyApplied.into());
        }

        let coupon = self.coupons.find_by_code(code).await?.ok_or(CouponError::CouponNotFound)?;
        let result = evaluate(cart.as_ref(), user, &coupon, today).map_err(|e| {
            tracing::info!(reason = ?e.kind(), "coupon rejected");
            e
        })?;
        let cart = cart.ok_or(CouponError::NoItems)?;

        if !self.carts.attach_coupon(cart.id(), &coupon.code).await? {
            tracing::warn!(cart = %cart.id(), "coupon attached concurrently");
            return Err(CouponError::AlreadyApplied.into());
        }
        tracing::info!(cart = %cart.id(), discount_value = %result.discount_value, "coupon applied");

        self.publish(CouponEvent::Applied { cart_id: cart.id(), user_id: user, code: coupon.code.clone(), discount_value: result.discount_value }).await;
        Ok(CartSummary::from(&result))
    }

    /// Detaches whatever coupon the user's cart carries.
    #[tracing::instrument(skip_all, fields(user = %user))]
    pub async fn remove(&self, user: UserId) -> ServiceResult<CartSummary> {
        let cart = self.carts.load_cart(user).await?.ok_or(ServiceError::CartNotFound)?;
        let code = self.carts.clear_coupon(cart.id()).await?;
        tracing::info!(cart = %cart.id(), removed = code.is_some(), "coupon cleared");

        self.publish(CouponEvent::Removed { cart_id: cart.id(), user_id: user, code }).await;
        Ok(CartSummary::without_discount(cart.total_price(), cart.tax()))
    }

    async fn publish(&self, event: CouponEvent) {
        if let Err(e) = self.events.publish(event.into()).await {
            tracing::warn!(error = %e, "failed to publish coupon event");
        }
    }
}
