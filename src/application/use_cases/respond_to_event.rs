use std::sync::Arc;

use tracing::{error, info};

use crate::application::use_cases::answer_question::AnswerQuestionUseCase;
use crate::application::use_cases::compose_reply::ReplyComposer;
use crate::application::MessagePoster;
use crate::domain::{DomainError, InboundEvent, OutboundMessage};

/// Answers one admitted event and posts the reply.
pub struct RespondToEventUseCase {
    answer_question: Arc<AnswerQuestionUseCase>,
    composer: ReplyComposer,
    poster: Arc<dyn MessagePoster>,
}

impl RespondToEventUseCase {
    pub fn new(
        answer_question: Arc<AnswerQuestionUseCase>,
        composer: ReplyComposer,
        poster: Arc<dyn MessagePoster>,
    ) -> Self {
        Self {
            answer_question,
            composer,
            poster,
        }
    }

    /// Builds the reply without posting it.
    pub async fn reply_for(&self, channel: &str, text: &str) -> Result<OutboundMessage, DomainError> {
        let answer = self.answer_question.execute(text).await?;
        Ok(self.composer.compose(channel, &answer))
    }

    pub async fn execute(&self, event: &InboundEvent) -> Result<(), DomainError> {
        let message = self.reply_for(&event.channel, &event.text).await?;
        self.poster.post(&message).await?;

        info!(
            "Answered event {} in channel {}",
            event.event_id.as_deref().unwrap_or("-"),
            event.channel
        );
        Ok(())
    }

    /// Like [`Self::execute`], but failures are logged and the event is
    /// dropped. Users never see an error message.
    pub async fn handle(&self, event: &InboundEvent) {
        if let Err(e) = self.execute(event).await {
            error!(
                "Failed to answer event {}: {}",
                event.event_id.as_deref().unwrap_or("-"),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::use_cases::catalog_index::CatalogIndex;
    use crate::connector::{DisabledAnswerProvider, MockEmbedding};
    use crate::domain::{Catalog, Document, LinkPolicy};

    #[derive(Default)]
    struct RecordingPoster {
        fail: bool,
        sent: Mutex<Vec<OutboundMessage>>,
    }

    #[async_trait]
    impl MessagePoster for RecordingPoster {
        async fn post(&self, message: &OutboundMessage) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::messaging("channel_not_found"));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    async fn use_case(poster: Arc<RecordingPoster>) -> RespondToEventUseCase {
        let catalog = Catalog::from_documents(vec![Document::new(
            "Reset Password",
            "https://portal/5/reset",
            "https://portal/5",
        )]);
        let index = CatalogIndex::build(catalog, Arc::new(MockEmbedding::new()))
            .await
            .unwrap();
        let answer = AnswerQuestionUseCase::new(
            Arc::new(index),
            Arc::new(DisabledAnswerProvider),
            LinkPolicy::allow_all(),
        );
        RespondToEventUseCase::new(
            Arc::new(answer),
            ReplyComposer::new(LinkPolicy::allow_all()),
            poster,
        )
    }

    fn event() -> InboundEvent {
        InboundEvent {
            event_id: Some("Ev1".to_string()),
            user: "U1".to_string(),
            text: "I forgot my password".to_string(),
            channel: "C1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_local_reply() {
        let poster = Arc::new(RecordingPoster::default());
        use_case(poster.clone()).await.handle(&event()).await;

        let sent = poster.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].channel, "C1");
        assert_eq!(sent[0].text, "Reset Password");
    }

    #[tokio::test]
    async fn test_post_failure_is_swallowed_by_handle() {
        let poster = Arc::new(RecordingPoster {
            fail: true,
            ..Default::default()
        });
        let use_case = use_case(poster.clone()).await;

        assert!(use_case.execute(&event()).await.is_err());
        use_case.handle(&event()).await;
        assert!(poster.sent.lock().unwrap().is_empty());
    }
}
