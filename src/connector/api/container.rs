use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{
    AdmitEventUseCase, AnswerProvider, AnswerQuestionUseCase, CatalogIndex, CatalogSource,
    EmbeddingService, MessagePoster, ReplyComposer, RespondToEventUseCase, DEFAULT_ALL_PORTALS_URL,
};
use crate::connector::{
    DisabledAnswerProvider, LoggingMessagePoster, MockEmbedding, OrtEmbedding,
    ServingEndpointClient, ServingEndpointConfig, SlackSignatureVerifier, SlackWebClient,
    SpreadsheetCatalogReader,
};
use crate::domain::{Catalog, DomainError, LinkPolicy, DEFAULT_PROCESSED_EVENT_CAPACITY};

pub const DEFAULT_CATALOG_PATH: &str = "db/seed/help_docs.xlsx";

pub struct ContainerConfig {
    pub catalog_path: String,
    pub mock_embeddings: bool,
    /// Hub id of the sentence-transformer; `None` uses the default model.
    pub embedding_model: Option<String>,
    /// Comma-separated URL prefixes; empty allows every link.
    pub allowed_link_prefixes: String,
    pub all_portals_url: String,
    pub serving_endpoint: ServingEndpointConfig,
    pub slack_bot_token: Option<String>,
    pub slack_signing_secret: String,
    pub skip_signature_verify: bool,
    /// Ask the chat platform for the bot's own user id at startup.
    pub discover_bot_identity: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            mock_embeddings: false,
            embedding_model: None,
            allowed_link_prefixes: String::new(),
            all_portals_url: DEFAULT_ALL_PORTALS_URL.to_string(),
            serving_endpoint: ServingEndpointConfig::default(),
            slack_bot_token: None,
            slack_signing_secret: String::new(),
            skip_signature_verify: false,
            discover_bot_identity: false,
        }
    }
}

impl ContainerConfig {
    pub fn link_policy(&self) -> LinkPolicy {
        LinkPolicy::parse(&self.allowed_link_prefixes)
    }
}

/// External collaborators the container wires around the catalog index.
pub struct Collaborators {
    pub embedding_service: Arc<dyn EmbeddingService>,
    pub answer_provider: Arc<dyn AnswerProvider>,
    pub message_poster: Arc<dyn MessagePoster>,
    pub bot_user_id: Option<String>,
}

pub struct Container {
    index: Arc<CatalogIndex>,
    answer_question: Arc<AnswerQuestionUseCase>,
    admit_event: Arc<AdmitEventUseCase>,
    respond_to_event: Arc<RespondToEventUseCase>,
}

impl Container {
    /// Builds every collaborator from `config`, loads the catalog and
    /// embeds it. Catalog problems abort startup.
    pub async fn new(config: ContainerConfig) -> Result<Self, DomainError> {
        let link_policy = config.link_policy();

        let embedding_service: Arc<dyn EmbeddingService> = if config.mock_embeddings {
            debug!("Using mock embedding service");
            Arc::new(MockEmbedding::new())
        } else {
            debug!("Initializing ONNX embedding service...");
            Arc::new(OrtEmbedding::new(config.embedding_model.as_deref())?)
        };

        let answer_provider: Arc<dyn AnswerProvider> = if config.serving_endpoint.is_complete() {
            info!("External answers from {}", config.serving_endpoint.url());
            Arc::new(ServingEndpointClient::new(
                config.serving_endpoint.clone(),
                &link_policy,
            ))
        } else {
            info!("External model disabled; answering from the local catalog only");
            Arc::new(DisabledAnswerProvider)
        };

        let (message_poster, bot_user_id): (Arc<dyn MessagePoster>, Option<String>) =
            match config.slack_bot_token.as_deref().filter(|t| !t.is_empty()) {
                Some(token) => {
                    let slack = SlackWebClient::new(token);
                    let bot_user_id = if config.discover_bot_identity {
                        slack.discover_bot_user_id().await
                    } else {
                        None
                    };
                    (Arc::new(slack) as Arc<dyn MessagePoster>, bot_user_id)
                }
                None => {
                    info!("No bot token configured; replies will be logged, not posted");
                    (Arc::new(LoggingMessagePoster) as Arc<dyn MessagePoster>, None)
                }
            };

        Self::with_collaborators(
            config,
            Collaborators {
                embedding_service,
                answer_provider,
                message_poster,
                bot_user_id,
            },
        )
        .await
    }

    /// Same wiring as [`Container::new`] with caller-supplied collaborators.
    pub async fn with_collaborators(
        config: ContainerConfig,
        collaborators: Collaborators,
    ) -> Result<Self, DomainError> {
        let link_policy = config.link_policy();

        let reader = SpreadsheetCatalogReader::new(PathBuf::from(&config.catalog_path));
        let catalog = Catalog::from_rows(&reader.load_rows()?);
        info!("Catalog {} has {} documents", reader.describe(), catalog.len());

        let index = Arc::new(CatalogIndex::build(catalog, collaborators.embedding_service).await?);

        let answer_question = Arc::new(AnswerQuestionUseCase::new(
            Arc::clone(&index),
            collaborators.answer_provider,
            link_policy.clone(),
        ));

        let composer =
            ReplyComposer::new(link_policy).with_all_portals_url(config.all_portals_url.clone());

        let respond_to_event = Arc::new(RespondToEventUseCase::new(
            Arc::clone(&answer_question),
            composer,
            collaborators.message_poster,
        ));

        let authenticator = SlackSignatureVerifier::new(config.slack_signing_secret.clone())
            .skip_verification(config.skip_signature_verify);
        let admit_event = Arc::new(
            AdmitEventUseCase::new(Arc::new(authenticator), DEFAULT_PROCESSED_EVENT_CAPACITY)
                .with_bot_user_id(collaborators.bot_user_id),
        );

        Ok(Self {
            index,
            answer_question,
            admit_event,
            respond_to_event,
        })
    }

    pub fn catalog_index(&self) -> Arc<CatalogIndex> {
        Arc::clone(&self.index)
    }

    pub fn answer_question_use_case(&self) -> Arc<AnswerQuestionUseCase> {
        Arc::clone(&self.answer_question)
    }

    pub fn admit_event_use_case(&self) -> Arc<AdmitEventUseCase> {
        Arc::clone(&self.admit_event)
    }

    pub fn respond_to_event_use_case(&self) -> Arc<RespondToEventUseCase> {
        Arc::clone(&self.respond_to_event)
    }
}
