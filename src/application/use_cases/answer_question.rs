use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::use_cases::catalog_index::CatalogIndex;
use crate::application::use_cases::find_alternates::{find_alternates, DEFAULT_ALTERNATES_LIMIT};
use crate::application::use_cases::resolve_link::{choose_best_link, find_document_by_link};
use crate::application::AnswerProvider;
use crate::domain::{AnswerSource, Document, DomainError, LinkPolicy, ResolvedAnswer};

/// Number of local candidates fetched when the external path gives nothing.
pub const LOCAL_FALLBACK_K: usize = 8;

/// Resolves a user question to a catalog document.
///
/// The external model is asked first and its link is mapped back onto the
/// catalog. Only when the model returns neither text nor an allowed link does
/// the local index answer. Alternates are attached whenever a document was
/// resolved, whichever path resolved it.
pub struct AnswerQuestionUseCase {
    index: Arc<CatalogIndex>,
    answer_provider: Arc<dyn AnswerProvider>,
    link_policy: LinkPolicy,
}

impl AnswerQuestionUseCase {
    pub fn new(
        index: Arc<CatalogIndex>,
        answer_provider: Arc<dyn AnswerProvider>,
        link_policy: LinkPolicy,
    ) -> Self {
        Self {
            index,
            answer_provider,
            link_policy,
        }
    }

    pub async fn execute(&self, text: &str) -> Result<ResolvedAnswer, DomainError> {
        let start_time = Instant::now();
        let documents = self.index.documents();

        let external = self.answer_provider.answer(text).await;
        let model_text = external.text().trim().to_string();
        let best_link = choose_best_link(&external, &self.link_policy);
        debug!(
            "External answer: {} chars, {} links, chosen link {:?}",
            model_text.len(),
            external.links().len(),
            best_link
        );

        let (mut resolved, mut answer) = self.reconcile(&best_link, documents);
        answer = answer
            .with_primary_link(best_link)
            .with_model_text(model_text);

        if !answer.is_model_backed() {
            let hits = self.index.top_k(text, LOCAL_FALLBACK_K).await?;
            if let Some(top) = hits.first() {
                debug!("Local fallback picked {}", top.display_line());
                resolved = Some(top.document());
                answer = ResolvedAnswer::from_document(top.document(), AnswerSource::Local);
            }
        }

        let alternates = find_alternates(
            resolved,
            documents,
            &self.link_policy,
            DEFAULT_ALTERNATES_LIMIT,
        );

        info!(
            "Resolved question via {} ({} alternates) in {:.2}s",
            answer.source,
            alternates.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(answer.with_alternates(alternates))
    }

    fn reconcile<'a>(
        &self,
        best_link: &str,
        documents: &'a [Document],
    ) -> (Option<&'a Document>, ResolvedAnswer) {
        if best_link.is_empty() {
            return (None, ResolvedAnswer::unresolved());
        }

        match find_document_by_link(best_link, documents) {
            Some(document) => (
                Some(document),
                ResolvedAnswer::from_document(document, AnswerSource::External),
            ),
            None => {
                debug!("Link {} is not in the catalog", best_link);
                (None, ResolvedAnswer::unmapped_link(best_link))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::connector::MockEmbedding;
    use crate::domain::{Catalog, ExternalAnswer};

    struct FixedAnswer(ExternalAnswer);

    #[async_trait]
    impl AnswerProvider for FixedAnswer {
        async fn answer(&self, _user_text: &str) -> ExternalAnswer {
            self.0.clone()
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    async fn use_case(answer: ExternalAnswer, documents: Vec<Document>) -> AnswerQuestionUseCase {
        let index = CatalogIndex::build(
            Catalog::from_documents(documents),
            Arc::new(MockEmbedding::new()),
        )
        .await
        .unwrap();
        AnswerQuestionUseCase::new(
            Arc::new(index),
            Arc::new(FixedAnswer(answer)),
            LinkPolicy::new(vec!["https://portal/".to_string()]),
        )
    }

    fn documents() -> Vec<Document> {
        vec![
            Document::new("Reset Password", "https://portal/5/reset", "https://portal/5"),
            Document::new("VPN", "https://portal/5/vpn", "https://portal/5"),
            Document::new("Laptop", "https://portal/9/laptop", "https://portal/9"),
        ]
    }

    #[tokio::test]
    async fn test_external_link_resolves_document() {
        let answer = ExternalAnswer::from_text("Answer: use the VPN form.\nLink: https://portal/5/vpn");
        let resolved = use_case(answer, documents()).await.execute("vpn?").await.unwrap();

        assert_eq!(resolved.source, AnswerSource::External);
        assert_eq!(resolved.request_title, "VPN");
        assert_eq!(resolved.portal_url, "https://portal/5");
        assert_eq!(resolved.primary_link, "https://portal/5/vpn");
        assert_eq!(resolved.alternates.len(), 1);
        assert_eq!(resolved.alternates[0].title(), "Reset Password");
    }

    #[tokio::test]
    async fn test_unmapped_link_gets_minimal_card() {
        let answer = ExternalAnswer::from_text("Link: https://portal/77/new");
        let resolved = use_case(answer, vec![]).await.execute("q").await.unwrap();

        assert!(resolved.document.is_none());
        assert_eq!(resolved.request_url, "https://portal/77/new");
        assert!(resolved.alternates.is_empty());
        assert!(resolved.is_model_backed());
    }

    #[tokio::test]
    async fn test_disallowed_link_with_text_skips_local_fallback() {
        let answer = ExternalAnswer::from_text("Answer: ask around. Link: https://elsewhere/x");
        let resolved = use_case(answer, documents()).await.execute("q").await.unwrap();

        assert!(resolved.primary_link.is_empty());
        assert!(resolved.document.is_none());
        assert_eq!(resolved.source, AnswerSource::None);
        assert!(resolved.is_model_backed());
    }

    #[tokio::test]
    async fn test_empty_external_answer_uses_local_index() {
        let resolved = use_case(ExternalAnswer::empty(), documents())
            .await
            .execute("Laptop | ")
            .await
            .unwrap();

        assert_eq!(resolved.source, AnswerSource::Local);
        assert_eq!(resolved.request_title, "Laptop");
        assert!(!resolved.is_model_backed());
        assert!(resolved.alternates.is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog_and_no_answer_is_unresolved() {
        let resolved = use_case(ExternalAnswer::empty(), vec![])
            .await
            .execute("anything")
            .await
            .unwrap();

        assert_eq!(resolved, ResolvedAnswer::unresolved());
    }
}
