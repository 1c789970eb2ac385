pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    AdmitEventUseCase, AnswerProvider, AnswerQuestionUseCase, CatalogIndex, CatalogSource,
    EmbeddingService, MessagePoster, ReplyComposer, RequestAuthenticator, RespondToEventUseCase,
    DEFAULT_ALL_PORTALS_URL,
};

pub use connector::{
    build_app, Collaborators, Container, ContainerConfig, DisabledAnswerProvider,
    LoggingMessagePoster, MockEmbedding, OrtEmbedding, Router, ServingEndpointClient,
    ServingEndpointConfig, SlackSignatureVerifier, SlackWebClient, SpreadsheetCatalogReader,
    DEFAULT_CATALOG_PATH,
};

pub use domain::{
    Catalog, CatalogRow, Document, DomainError, ExternalAnswer, InboundEvent, LinkPolicy,
    OutboundMessage, ResolvedAnswer, SearchResult,
};
