//! PostgreSQL store backed by sqlx.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::{CartStore, CouponStore, StoreError, StoreResult, WishlistStore};
use crate::domain::aggregates::{CartLine, CartSnapshot, Coupon, PageWindow, WishlistEntry, WishlistPage};
use crate::domain::value_objects::{CartId, CouponCode, Percentage, ProductId, Quantity, UserId};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct CartRow { id: Uuid, user_id: Uuid, tax: Decimal, coupon_code: Option<String> }

#[derive(sqlx::FromRow)]
struct CartItemRow { product_id: Uuid, unit_price: Decimal, quantity: i32 }

#[derive(sqlx::FromRow)]
struct CouponRow { code: String, discount_percentage: Decimal, expire_date: NaiveDate, min_value_to_apply: Decimal, max_discount_value: Decimal }

#[derive(sqlx::FromRow)]
struct WishlistRow { user_id: Uuid, product_id: Uuid, created_at: DateTime<Utc> }

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new().max_connections(max_connections).connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

fn corrupt(e: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(e.to_string())
}

fn coupon_code(raw: String) -> StoreResult<CouponCode> {
    CouponCode::new(raw).map_err(corrupt)
}

impl TryFrom<CartItemRow> for CartLine {
    type Error = StoreError;

    fn try_from(row: CartItemRow) -> StoreResult<Self> {
        let quantity = u32::try_from(row.quantity).ok().and_then(Quantity::new)
            .ok_or_else(|| corrupt(format!("cart item quantity {}", row.quantity)))?;
        Ok(CartLine::new(row.product_id.into(), row.unit_price, quantity))
    }
}

impl From<WishlistRow> for WishlistEntry {
    fn from(row: WishlistRow) -> Self {
        Self { user_id: row.user_id.into(), product_id: row.product_id.into(), created_at: row.created_at }
    }
}

#[async_trait]
impl CartStore for PgStore {
    async fn load_cart(&self, user: UserId) -> StoreResult<Option<CartSnapshot>> {
        let Some(cart) = sqlx::query_as::<_, CartRow>("SELECT id, user_id, tax, coupon_code FROM carts WHERE user_id = $1")
            .bind(user.as_uuid()).fetch_optional(&self.pool).await? else {
            return Ok(None);
        };
        let lines = sqlx::query_as::<_, CartItemRow>("SELECT product_id, unit_price, quantity FROM cart_items WHERE cart_id = $1 ORDER BY created_at, id")
            .bind(cart.id).fetch_all(&self.pool).await?
            .into_iter().map(CartLine::try_from).collect::<StoreResult<Vec<_>>>()?;
        let coupon = cart.coupon_code.map(coupon_code).transpose()?;
        Ok(Some(CartSnapshot::new(cart.id.into(), cart.user_id.into(), cart.tax, lines).with_coupon(coupon)))
    }

    async fn attach_coupon(&self, cart: CartId, code: &CouponCode) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE carts SET coupon_code = $2, updated_at = NOW() WHERE id = $1 AND coupon_code IS NULL")
            .bind(cart.as_uuid()).bind(code.as_str()).execute(&self.pool).await?;
        Ok(result.rows_affected() == 1)
    }

    async fn clear_coupon(&self, cart: CartId) -> StoreResult<Option<CouponCode>> {
        let mut tx = self.pool.begin().await?;
        let previous: Option<Option<String>> = sqlx::query_scalar("SELECT coupon_code FROM carts WHERE id = $1 FOR UPDATE")
            .bind(cart.as_uuid()).fetch_optional(&mut *tx).await?;
        sqlx::query("UPDATE carts SET coupon_code = NULL, updated_at = NOW() WHERE id = $1")
            .bind(cart.as_uuid()).execute(&mut *tx).await?;
        tx.commit().await?;
        previous.flatten().map(coupon_code).transpose()
    }
}

#[async_trait]
impl CouponStore for PgStore {
    async fn find_by_code(&self, code: &CouponCode) -> StoreResult<Option<Coupon>> {
        let Some(row) = sqlx::query_as::<_, CouponRow>("SELECT code, discount_percentage, expire_date, min_value_to_apply, max_discount_value FROM coupons WHERE code = $1")
            .bind(code.as_str()).fetch_optional(&self.pool).await? else {
            return Ok(None);
        };
        let products: Vec<Uuid> = sqlx::query_scalar("SELECT product_id FROM coupon_products WHERE coupon_code = $1")
            .bind(&row.code).fetch_all(&self.pool).await?;
        let users: Vec<Uuid> = sqlx::query_scalar("SELECT user_id FROM coupon_users WHERE coupon_code = $1")
            .bind(&row.code).fetch_all(&self.pool).await?;

        let coupon = Coupon::new(coupon_code(row.code)?, Percentage::new(row.discount_percentage).map_err(corrupt)?, row.expire_date)
            .with_minimum(row.min_value_to_apply)
            .with_max_discount(row.max_discount_value)
            .with_products(products.into_iter().map(ProductId::from))
            .with_users(users.into_iter().map(UserId::from));
        Ok(Some(coupon))
    }
}

#[async_trait]
impl WishlistStore for PgStore {
    async fn list(&self, user: UserId, window: PageWindow) -> StoreResult<WishlistPage> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wishlists WHERE user_id = $1")
            .bind(user.as_uuid()).fetch_one(&self.pool).await?;
        let rows = sqlx::query_as::<_, WishlistRow>("SELECT user_id, product_id, created_at FROM wishlists WHERE user_id = $1 ORDER BY created_at, id LIMIT $2 OFFSET $3")
            .bind(user.as_uuid()).bind(window.limit as i64).bind(window.offset as i64).fetch_all(&self.pool).await?;
        Ok(WishlistPage { count: count.max(0) as u64, results: rows.into_iter().map(WishlistEntry::from).collect() })
    }

    async fn add(&self, user: UserId, product: ProductId) -> StoreResult<WishlistEntry> {
        let row = sqlx::query_as::<_, WishlistRow>("INSERT INTO wishlists (id, user_id, product_id, created_at) VALUES ($1, $2, $3, NOW()) ON CONFLICT (user_id, product_id) DO NOTHING RETURNING user_id, product_id, created_at")
            .bind(Uuid::now_v7()).bind(user.as_uuid()).bind(product.as_uuid())
            .fetch_optional(&self.pool).await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => StoreError::ProductNotFound(product),
                other => StoreError::Database(other),
            })?;
        row.map(WishlistEntry::from).ok_or(StoreError::DuplicateWishlistEntry(product))
    }

    async fn remove(&self, user: UserId, product: ProductId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND product_id = $2")
            .bind(user.as_uuid()).bind(product.as_uuid()).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
