//! Storefront domain: value objects, aggregates, events and coupon evaluation
pub mod aggregates;
pub mod evaluator;
pub mod events;
pub mod value_objects;
