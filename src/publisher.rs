//! Domain event publishing

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::events::DomainEvent;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError>;
}

/// Publishes events as JSON on NATS, one subject per event type.
pub struct NatsPublisher {
    client: async_nats::Client,
}

impl NatsPublisher {
    pub fn new(client: async_nats::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventPublisher for NatsPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(&event)?;
        self.client
            .publish(event.subject().to_string(), payload.into())
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))
    }
}

/// Fallback when no broker is configured: events only reach the log.
#[derive(Default)]
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(subject = event.subject(), %payload, "domain event");
        Ok(())
    }
}

/// Keeps published events in memory, for tests.
#[derive(Default, Clone)]
pub struct RecordingPublisher {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.write().await)
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError> {
        self.events.write().await.push(event);
        Ok(())
    }
}
