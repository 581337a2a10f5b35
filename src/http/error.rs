use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::{json, Value};

use crate::domain::evaluator::StatusCategory;
use crate::i18n::{Lang, Localizer, MessageKey};
use crate::services::ServiceError;

/// JSON error response with its status
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Maps a service failure to a localized response.
    pub fn from_service(err: ServiceError, messages: &dyn Localizer, lang: Lang) -> Self {
        match err {
            ServiceError::Coupon(e) => {
                let status = match e.status_category() {
                    StatusCategory::NotFound => StatusCode::NOT_FOUND,
                    StatusCategory::Forbidden => StatusCode::FORBIDDEN,
                    StatusCategory::BadRequest => StatusCode::BAD_REQUEST,
                };
                Self::new(status, json!({"error": messages.coupon_error(&e, lang)}))
            }
            ServiceError::CartNotFound => Self::new(StatusCode::BAD_REQUEST, json!({"message": messages.message(MessageKey::RemoveFailed, lang)})),
            ServiceError::ProductNotFound(_) => Self::new(StatusCode::BAD_REQUEST, json!({"error": messages.message(MessageKey::WishlistMissingProduct, lang)})),
            ServiceError::AlreadyInWishlist(_) => Self::new(StatusCode::BAD_REQUEST, json!({"error": messages.message(MessageKey::WishlistDuplicate, lang)})),
            ServiceError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "Internal server error"}))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
