//! Aggregates module
pub mod cart;
pub mod coupon;
pub mod wishlist;

pub use cart::{CartError, CartLine, CartSnapshot};
pub use coupon::Coupon;
pub use wishlist::{PageWindow, WishlistEntry, WishlistPage};
