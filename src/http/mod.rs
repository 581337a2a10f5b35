//! HTTP surface

use std::sync::Arc;

use axum::{routing::{delete, get, post}, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::i18n::{Lang, Localizer};
use crate::services::{CouponService, WishlistService};

mod coupon;
mod error;
mod extract;
mod wishlist;

pub use coupon::ApplyCouponRequest;
pub use error::ApiError;
pub use extract::{AuthUser, RequestLang, USER_ID_HEADER};
pub use wishlist::{AddWishlistRequest, WishlistParams};

#[derive(Clone)]
pub struct AppState {
    pub coupons: CouponService,
    pub wishlist: WishlistService,
    pub messages: Arc<dyn Localizer>,
    pub default_lang: Lang,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-storefront"})) }))
        .route("/api/v1/coupon", post(coupon::apply_coupon).delete(coupon::remove_coupon))
        .route("/api/v1/wishlist", get(wishlist::list_wishlist).post(wishlist::add_to_wishlist))
        .route("/api/v1/wishlist/:pk", delete(wishlist::remove_from_wishlist))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
