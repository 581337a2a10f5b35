use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use super::{ApiError, AppState, AuthUser, RequestLang};
use crate::domain::evaluator::CouponError;
use crate::domain::value_objects::CouponCode;
use crate::i18n::{Localizer, MessageKey};
use crate::summary::CartSummary;

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyCouponRequest {
    #[validate(length(max = 50))]
    pub code: Option<String>,
}

pub async fn apply_coupon(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
    RequestLang(lang): RequestLang,
    Json(r): Json<ApplyCouponRequest>,
) -> Result<Json<CartSummary>, ApiError> {
    if r.validate().is_err() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, json!({"error": s.messages.message(MessageKey::InvalidCoupon, lang)})));
    }
    // a missing or blank code cannot match any coupon
    let code = r.code.and_then(|c| CouponCode::new(c).ok())
        .ok_or_else(|| ApiError::from_service(CouponError::CouponNotFound.into(), s.messages.as_ref(), lang))?;
    s.coupons.apply(user, &code).await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, s.messages.as_ref(), lang))
}

pub async fn remove_coupon(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
    RequestLang(lang): RequestLang,
) -> Result<Json<CartSummary>, ApiError> {
    s.coupons.remove(user).await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, s.messages.as_ref(), lang))
}
