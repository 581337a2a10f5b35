//! Value Objects for the storefront

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self { Self(Uuid::now_v7()) }
            pub fn as_uuid(&self) -> Uuid { self.0 }
        }

        impl Default for $name { fn default() -> Self { Self::new() } }

        impl From<Uuid> for $name { fn from(id: Uuid) -> Self { Self(id) } }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
        }
    };
}

uuid_id!(
    /// Catalog product identity
    ProductId
);
uuid_id!(
    /// Authenticated customer identity
    UserId
);
uuid_id!(CartId);

/// Coupon code value object. Codes are exact and case-sensitive; surrounding
/// whitespace is part of the code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    pub const MAX_LEN: usize = 50;

    pub fn new(value: impl Into<String>) -> Result<Self, CouponCodeError> {
        let value = value.into();
        if value.trim().is_empty() { return Err(CouponCodeError::Empty); }
        if value.chars().count() > Self::MAX_LEN { return Err(CouponCodeError::TooLong); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponCodeError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self { code.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CouponCodeError { Empty, TooLong }
impl std::error::Error for CouponCodeError {}
impl fmt::Display for CouponCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Empty => write!(f, "Coupon code empty"), Self::TooLong => write!(f, "Coupon code too long") }
    }
}

/// Percentage value object, always within 0..=100
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    pub fn new(value: Decimal) -> Result<Self, PercentageError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED { return Err(PercentageError::OutOfRange(value)); }
        Ok(Self(value))
    }
    pub fn value(&self) -> Decimal { self.0 }
    /// `amount * self / 100`
    pub fn of(&self, amount: Decimal) -> Decimal { amount * self.0 / Decimal::ONE_HUNDRED }
}

impl TryFrom<Decimal> for Percentage {
    type Error = PercentageError;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Percentage> for Decimal {
    fn from(p: Percentage) -> Self { p.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum PercentageError { OutOfRange(Decimal) }
impl std::error::Error for PercentageError {}
impl fmt::Display for PercentageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::OutOfRange(v) => write!(f, "Percentage {} outside 0..=100", v) }
    }
}

/// Quantity value object, a cart line always holds at least one unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Option<Self> { if value == 0 { None } else { Some(Self(value)) } }
    pub fn value(&self) -> u32 { self.0 }
    pub fn as_decimal(&self) -> Decimal { Decimal::from(self.0) }
}

impl TryFrom<u32> for Quantity {
    type Error = &'static str;
    fn try_from(value: u32) -> Result<Self, Self::Error> { Self::new(value).ok_or("quantity must be at least 1") }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self { q.0 }
}
