//! OpenSASE Storefront - coupon and wishlist service

use std::sync::Arc;

use anyhow::Result;
use opensase_storefront::{
    config::Config,
    http::{router, AppState},
    i18n::MessageCatalog,
    publisher::{EventPublisher, LogPublisher, NatsPublisher},
    services::{CouponService, WishlistService},
    store::{CartStore, CouponStore, InMemoryStore, PgStore, WishlistStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Stores = (Arc<dyn CartStore>, Arc<dyn CouponStore>, Arc<dyn WishlistStore>);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let (carts, coupons, wishlists): Stores = match &config.database_url {
        Some(url) => {
            let store = Arc::new(PgStore::connect(url, config.db_max_connections).await?);
            (store.clone() as Arc<dyn CartStore>, store.clone() as Arc<dyn CouponStore>, store as Arc<dyn WishlistStore>)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            let store = Arc::new(InMemoryStore::new());
            (store.clone() as Arc<dyn CartStore>, store.clone() as Arc<dyn CouponStore>, store as Arc<dyn WishlistStore>)
        }
    };

    let events: Arc<dyn EventPublisher> = match &config.nats_url {
        Some(url) => match async_nats::connect(url.as_str()).await {
            Ok(client) => Arc::new(NatsPublisher::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "NATS unavailable, logging events instead");
                Arc::new(LogPublisher)
            }
        },
        None => Arc::new(LogPublisher),
    };

    let state = AppState {
        coupons: CouponService::new(carts, coupons, events.clone()),
        wishlist: WishlistService::new(wishlists, events),
        messages: Arc::new(MessageCatalog::default()),
        default_lang: config.default_lang,
    };

    tracing::info!("🚀 OpenSASE Storefront listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, router(state)).await?;
    Ok(())
}
