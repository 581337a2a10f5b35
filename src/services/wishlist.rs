//! Customer wishlists.

use std::sync::Arc;

use super::ServiceResult;
use crate::domain::aggregates::{PageWindow, WishlistEntry, WishlistPage};
use crate::domain::events::WishlistEvent;
use crate::domain::value_objects::{ProductId, UserId};
use crate::publisher::EventPublisher;
use crate::store::WishlistStore;

#[derive(Clone)]
pub struct WishlistService {
    store: Arc<dyn WishlistStore>,
    events: Arc<dyn EventPublisher>,
}

impl WishlistService {
    pub fn new(store: Arc<dyn WishlistStore>, events: Arc<dyn EventPublisher>) -> Self {
        Self { store, events }
    }

    pub async fn list(&self, user: UserId, window: PageWindow) -> ServiceResult<WishlistPage> {
        Ok(self.store.list(user, window).await?)
    }

    #[tracing::instrument(skip_all, fields(user = %user, product = %product))]
    pub async fn add(&self, user: UserId, product: ProductId) -> ServiceResult<WishlistEntry> {
        let entry = self.store.add(user, product).await?;
        self.publish(WishlistEvent::ProductAdded { user_id: user, product_id: product }).await;
        Ok(entry)
    }

    /// Removing a product that is not listed is not an error.
    #[tracing::instrument(skip_all, fields(user = %user, product = %product))]
    pub async fn remove(&self, user: UserId, product: ProductId) -> ServiceResult<()> {
        if self.store.remove(user, product).await? {
            self.publish(WishlistEvent::ProductRemoved { user_id: user, product_id: product }).await;
        }
        Ok(())
    }

    async fn publish(&self, event: WishlistEvent) {
        if let Err(e) = self.events.publish(event.into()).await {
            tracing::warn!(error = %e, "failed to publish wishlist event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::RecordingPublisher;
    use crate::services::ServiceError;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn test_wishlist_flow() {
        let events = RecordingPublisher::new();
        let service = WishlistService::new(Arc::new(InMemoryStore::new()), Arc::new(events.clone()));
        let user = UserId::new();
        let product = ProductId::new();

        service.add(user, product).await.unwrap();
        assert!(matches!(service.add(user, product).await, Err(ServiceError::AlreadyInWishlist(p)) if p == product));
        assert_eq!(service.list(user, PageWindow::default()).await.unwrap().count, 1);

        service.remove(user, product).await.unwrap();
        service.remove(user, product).await.unwrap();
        assert_eq!(service.list(user, PageWindow::default()).await.unwrap().count, 0);
        // one add, one effective removal
        assert_eq!(events.take().await.len(), 2);
    }
}
