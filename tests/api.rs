use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use opensase_storefront::{
    http::{router, AppState, USER_ID_HEADER},
    i18n::{Lang, MessageCatalog},
    publisher::RecordingPublisher,
    services::{CouponService, WishlistService},
    store::InMemoryStore,
    CartId, CartLine, CartSnapshot, Coupon, CouponCode, Percentage, ProductId, Quantity, UserId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    store: Arc<InMemoryStore>,
    user: UserId,
    product: ProductId,
}

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive().succ_opt().unwrap()
}

fn coupon(code: &str, pct: Decimal) -> Coupon {
    Coupon::new(CouponCode::new(code).unwrap(), Percentage::new(pct).unwrap(), tomorrow())
}

/// Cart priced at 200 whose only line is product P, 2 x 50.
async fn setup() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let events = Arc::new(RecordingPublisher::new());
    let user = UserId::new();
    let product = ProductId::new();
    let cart = CartSnapshot::new(CartId::new(), user, dec!(14), vec![CartLine::new(product, dec!(50), Quantity::new(2).unwrap())])
        .with_total_price(dec!(200));
    store.insert_cart(cart).await;

    let state = AppState {
        coupons: CouponService::new(store.clone(), store.clone(), events.clone()),
        wishlist: WishlistService::new(store.clone(), events),
        messages: Arc::new(MessageCatalog::default()),
        default_lang: Lang::En,
    };
    TestApp { app: router(state), store, user, product }
}

async fn send(app: &Router, method: Method, uri: &str, user: Option<UserId>, lang: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        req = req.header(USER_ID_HEADER, user.to_string());
    }
    if let Some(lang) = lang {
        req = req.header("accept-language", lang);
    }
    let req = match body {
        Some(body) => req.header("content-type", "application/json").body(Body::from(body.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn apply(t: &TestApp, code: &str) -> (StatusCode, Value) {
    send(&t.app, Method::POST, "/api/v1/coupon", Some(t.user), None, Some(json!({"code": code}))).await
}

fn decimal(v: &Value) -> Decimal {
    v.as_str().expect("decimal serialized as string").parse().unwrap()
}

#[tokio::test]
async fn scenario_a_whole_cart_coupon() {
    let t = setup().await;
    t.store.insert_coupon(coupon("TEN", dec!(10))).await;

    let (status, body) = apply(&t, "TEN").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["total_price"]), dec!(200));
    assert_eq!(decimal(&body["discount"]), dec!(10));
    assert_eq!(decimal(&body["discount_value"]), dec!(20));
    assert_eq!(decimal(&body["tax"]), dec!(14));
    assert_eq!(decimal(&body["final_price"]), dec!(194));
}

#[tokio::test]
async fn scenario_b_product_not_in_cart() {
    let t = setup().await;
    t.store.insert_coupon(coupon("ONLYQ", dec!(10)).with_products([ProductId::new()])).await;

    let (status, body) = apply(&t, "ONLYQ").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "This coupon is not valid for the products in your cart");
}

#[tokio::test]
async fn restricted_coupon_percent_is_relative_to_cart_total() {
    let t = setup().await;
    t.store.insert_coupon(coupon("ONLYP", dec!(10)).with_products([t.product])).await;

    let (status, body) = apply(&t, "ONLYP").await;
    assert_eq!(status, StatusCode::OK);
    // 10% of the 100 eligible subtotal is 5% of the 200 cart
    assert_eq!(decimal(&body["discount"]), dec!(5));
    assert_eq!(decimal(&body["discount_value"]), dec!(10));
}

#[tokio::test]
async fn scenario_c_discount_cap() {
    let t = setup().await;
    t.store.insert_coupon(coupon("HALF", dec!(50)).with_max_discount(dec!(30))).await;

    let (status, body) = apply(&t, "HALF").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["discount_value"]), dec!(30));
    assert_eq!(decimal(&body["discount"]), dec!(15));
}

#[tokio::test]
async fn scenario_d_minimum_not_met() {
    let t = setup().await;
    t.store.insert_coupon(coupon("BIG", dec!(10)).with_minimum(dec!(500))).await;

    let (status, body) = apply(&t, "BIG").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "The minimum cart value to apply this coupon is 500");
}

#[tokio::test]
async fn scenario_e_private_coupon() {
    let t = setup().await;
    t.store.insert_coupon(coupon("VIP", dec!(10)).with_users([UserId::new()])).await;

    let (status, body) = apply(&t, "VIP").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid coupon");
}

#[tokio::test]
async fn scenario_f_empty_cart() {
    let t = setup().await;
    let empty_user = UserId::new();
    t.store.insert_cart(CartSnapshot::for_user(empty_user)).await;
    t.store.insert_coupon(coupon("TEN", dec!(10))).await;

    let (status, body) = send(&t.app, Method::POST, "/api/v1/coupon", Some(empty_user), None, Some(json!({"code": "TEN"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Your cart has no items");
}

#[tokio::test]
async fn expired_on_expire_date() {
    let t = setup().await;
    let mut c = coupon("OLD", dec!(10));
    c.expire_date = Utc::now().date_naive();
    t.store.insert_coupon(c).await;

    let (status, _) = apply(&t, "OLD").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_or_missing_code_is_not_found() {
    let t = setup().await;
    let (status, body) = apply(&t, "NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid coupon");

    let (status, _) = send(&t.app, Method::POST, "/api/v1/coupon", Some(t.user), None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = apply(&t, &"X".repeat(51)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid coupon");
}

#[tokio::test]
async fn empty_and_blank_codes_are_not_found() {
    let t = setup().await;
    for code in ["", "   "] {
        let (status, body) = send(&t.app, Method::POST, "/api/v1/coupon", Some(t.user), Some("ar"), Some(json!({"code": code}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "code {:?}", code);
        assert_eq!(body["error"], "كوبون غير صالح");
    }
}

#[tokio::test]
async fn codes_match_exactly() {
    let t = setup().await;
    t.store.insert_coupon(coupon("TEN", dec!(10))).await;

    assert_eq!(apply(&t, " TEN ").await.0, StatusCode::NOT_FOUND);
    assert_eq!(apply(&t, "ten").await.0, StatusCode::NOT_FOUND);
    assert_eq!(apply(&t, "TEN").await.0, StatusCode::OK);
}

#[tokio::test]
async fn language_falls_through_unsupported_tags() {
    let t = setup().await;
    let (status, body) = send(&t.app, Method::POST, "/api/v1/coupon", Some(t.user), Some("fr-FR,ar;q=0.9"), Some(json!({"code": "NOPE"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "كوبون غير صالح");
}

#[tokio::test]
async fn already_applied_then_removed() {
    let t = setup().await;
    t.store.insert_coupon(coupon("TEN", dec!(10))).await;
    assert_eq!(apply(&t, "TEN").await.0, StatusCode::OK);

    let (status, body) = send(&t.app, Method::POST, "/api/v1/coupon", Some(t.user), Some("ar-EG,en;q=0.8"), Some(json!({"code": "TEN"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "تم تطبيق كوبون على سلتك بالفعل");

    let (status, body) = send(&t.app, Method::DELETE, "/api/v1/coupon", Some(t.user), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["discount"]), dec!(0));
    assert_eq!(decimal(&body["final_price"]), dec!(214));

    assert_eq!(apply(&t, "TEN").await.0, StatusCode::OK);
}

#[tokio::test]
async fn remove_without_cart_fails() {
    let t = setup().await;
    let (status, body) = send(&t.app, Method::DELETE, "/api/v1/coupon", Some(UserId::new()), None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Something has occurred");
}

#[tokio::test]
async fn requests_require_identity() {
    let t = setup().await;
    let (status, _) = send(&t.app, Method::POST, "/api/v1/coupon", None, None, Some(json!({"code": "TEN"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&t.app, Method::GET, "/api/v1/wishlist", None, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wishlist_round_trip() {
    let t = setup().await;
    let (status, body) = send(&t.app, Method::POST, "/api/v1/wishlist", Some(t.user), None, Some(json!({"pk": t.product}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product_id"], json!(t.product));

    let (status, body) = send(&t.app, Method::POST, "/api/v1/wishlist", Some(t.user), None, Some(json!({"pk": t.product}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product is already in your wishlist");

    let (status, body) = send(&t.app, Method::GET, "/api/v1/wishlist?limit=10", Some(t.user), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let uri = format!("/api/v1/wishlist/{}", t.product);
    assert_eq!(send(&t.app, Method::DELETE, &uri, Some(t.user), None, None).await.0, StatusCode::OK);
    assert_eq!(send(&t.app, Method::DELETE, &uri, Some(t.user), None, None).await.0, StatusCode::OK);
    let (_, body) = send(&t.app, Method::GET, "/api/v1/wishlist", Some(t.user), None, None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn health() {
    let t = setup().await;
    let (status, body) = send(&t.app, Method::GET, "/health", None, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
