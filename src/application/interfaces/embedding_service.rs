use async_trait::async_trait;

use crate::domain::{DomainError, EmbeddingConfig};

/// Generates unit-normalized vector embeddings for catalog text and queries.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embeds `texts` in order; the output has one vector per input.
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError>;

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError>;

    fn config(&self) -> &EmbeddingConfig;
}
