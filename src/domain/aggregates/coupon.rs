//! Coupon Aggregate

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use crate::domain::value_objects::{CouponCode, Percentage, ProductId, UserId};

/// A percentage discount rule identified by its code.
///
/// Zero values mean "no constraint": a `min_value_to_apply` of zero has no
/// minimum, a `max_discount_value` of zero leaves the discount uncapped, and
/// empty `products`/`users` sets apply to the whole cart and every customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: CouponCode,
    pub discount_percentage: Percentage,
    /// First day on which the coupon is no longer valid
    pub expire_date: NaiveDate,
    pub min_value_to_apply: Decimal,
    pub max_discount_value: Decimal,
    #[serde(default)]
    pub products: HashSet<ProductId>,
    #[serde(default)]
    pub users: HashSet<UserId>,
}

impl Coupon {
    pub fn new(code: CouponCode, discount_percentage: Percentage, expire_date: NaiveDate) -> Self {
        Self {
            code, discount_percentage, expire_date,
            min_value_to_apply: Decimal::ZERO, max_discount_value: Decimal::ZERO,
            products: HashSet::new(), users: HashSet::new(),
        }
    }

    pub fn with_minimum(mut self, min_value: Decimal) -> Self { self.min_value_to_apply = min_value; self }
    pub fn with_max_discount(mut self, max_value: Decimal) -> Self { self.max_discount_value = max_value; self }
    pub fn with_products(mut self, products: impl IntoIterator<Item = ProductId>) -> Self { self.products.extend(products); self }
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserId>) -> Self { self.users.extend(users); self }

    pub fn is_restricted_to_products(&self) -> bool { !self.products.is_empty() }
    pub fn is_public(&self) -> bool { self.users.is_empty() }
    pub fn is_available_to(&self, user: UserId) -> bool { self.is_public() || self.users.contains(&user) }
    /// Expiry is inclusive of `expire_date` itself.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool { today >= self.expire_date }
    pub fn has_minimum(&self) -> bool { self.min_value_to_apply > Decimal::ZERO }
    pub fn has_cap(&self) -> bool { self.max_discount_value > Decimal::ZERO }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn coupon() -> Coupon {
        Coupon::new(CouponCode::new("SPRING").unwrap(), Percentage::new(dec!(10)).unwrap(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    #[test]
    fn test_expiry_is_same_day() {
        let c = coupon();
        assert!(!c.is_expired_on(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(c.is_expired_on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
    }

    #[test]
    fn test_private_coupon() {
        let allowed = UserId::new();
        let c = coupon().with_users([allowed]);
        assert!(!c.is_public());
        assert!(c.is_available_to(allowed));
        assert!(!c.is_available_to(UserId::new()));
        assert!(coupon().is_available_to(UserId::new()));
    }

    #[test]
    fn test_zero_means_unconstrained() {
        let c = coupon();
        assert!(!c.has_minimum() && !c.has_cap() && !c.is_restricted_to_products());
        let c = c.with_minimum(dec!(100)).with_max_discount(dec!(5)).with_products([ProductId::new()]);
        assert!(c.has_minimum() && c.has_cap() && c.is_restricted_to_products());
    }
}
