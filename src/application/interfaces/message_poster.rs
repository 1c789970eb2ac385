use async_trait::async_trait;

use crate::domain::{DomainError, OutboundMessage};

/// Delivers composed replies to the chat platform.
#[async_trait]
pub trait MessagePoster: Send + Sync {
    async fn post(&self, message: &OutboundMessage) -> Result<(), DomainError>;
}
