use async_trait::async_trait;

use crate::domain::ExternalAnswer;

/// Asks an external model for a free-text answer.
///
/// Implementations never fail: every problem collapses into
/// [`ExternalAnswer::empty`], which callers treat as "no answer".
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn answer(&self, user_text: &str) -> ExternalAnswer;

    /// `false` when the provider is switched off or missing settings.
    fn is_enabled(&self) -> bool;
}
