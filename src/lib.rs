//! OpenSASE Storefront
//!
//! Storefront backend services built around the coupon engine.
//!
//! ## Features
//! - Coupon evaluation against a customer's cart
//! - Applying and removing cart coupons
//! - Customer wishlists
//! - Localized (English/Arabic) error messages
//! - Domain events over NATS

pub mod config;
pub mod domain;
pub mod http;
pub mod i18n;
pub mod publisher;
pub mod services;
pub mod store;
pub mod summary;

pub use domain::aggregates::{CartLine, CartSnapshot, Coupon};
pub use domain::evaluator::{evaluate, CouponError, CouponErrorKind, EvaluationResult};
pub use domain::value_objects::{CartId, CouponCode, Percentage, ProductId, Quantity, UserId};
pub use summary::CartSummary;
