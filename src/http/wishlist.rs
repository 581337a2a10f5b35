use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, AppState, AuthUser, RequestLang};
use crate::domain::aggregates::{PageWindow, WishlistEntry, WishlistPage};
use crate::domain::value_objects::ProductId;

#[derive(Debug, Deserialize)]
pub struct WishlistParams { pub limit: Option<u32>, pub offset: Option<u32> }

#[derive(Debug, Deserialize)]
pub struct AddWishlistRequest { pub pk: Uuid }

pub async fn list_wishlist(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
    RequestLang(lang): RequestLang,
    Query(p): Query<WishlistParams>,
) -> Result<Json<WishlistPage>, ApiError> {
    s.wishlist.list(user, PageWindow::new(p.limit, p.offset)).await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, s.messages.as_ref(), lang))
}

pub async fn add_to_wishlist(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
    RequestLang(lang): RequestLang,
    Json(r): Json<AddWishlistRequest>,
) -> Result<Json<WishlistEntry>, ApiError> {
    s.wishlist.add(user, ProductId::from(r.pk)).await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, s.messages.as_ref(), lang))
}

pub async fn remove_from_wishlist(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
    RequestLang(lang): RequestLang,
    Path(pk): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    s.wishlist.remove(user, ProductId::from(pk)).await
        .map(|_| StatusCode::OK)
        .map_err(|e| ApiError::from_service(e, s.messages.as_ref(), lang))
}
