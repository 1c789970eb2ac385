use async_trait::async_trait;
use tracing::info;

use crate::application::MessagePoster;
use crate::domain::{DomainError, OutboundMessage};

/// Writes replies to the log instead of posting them. Used when no bot
/// token is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMessagePoster;

#[async_trait]
impl MessagePoster for LoggingMessagePoster {
    async fn post(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        let blocks = serde_json::to_string(&message.blocks)
            .map_err(|e| DomainError::internal(format!("Failed to serialize blocks: {}", e)))?;
        info!(
            "Reply for channel {} (not posted): {} {}",
            message.channel, message.text, blocks
        );
        Ok(())
    }
}
