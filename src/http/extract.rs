use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts, StatusCode},
    Json,
};
use uuid::Uuid;

use super::AppState;
use crate::domain::value_objects::UserId;
use crate::i18n::Lang;

/// Set by the authenticating gateway in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated customer taken from [`USER_ID_HEADER`].
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(|id| AuthUser(UserId::from(id)))
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, Json(serde_json::json!({"error": "Authentication credentials were not provided"}))))
    }
}

/// Response language from `Accept-Language`, falling back to the configured default.
#[derive(Debug, Clone, Copy)]
pub struct RequestLang(pub Lang);

#[async_trait]
impl FromRequestParts<AppState> for RequestLang {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(Lang::from_accept_language)
            .unwrap_or(state.default_lang);
        Ok(RequestLang(lang))
    }
}
