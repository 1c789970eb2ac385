use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Messaging error: {0}")]
    MessagingError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::CatalogError(msg.into())
    }

    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingError(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    pub fn messaging(msg: impl Into<String>) -> Self {
        Self::MessagingError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
