//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use ask_bestie::{
    AnswerProvider, Collaborators, Container, ContainerConfig, DisabledAnswerProvider,
    DomainError, ExternalAnswer, MessagePoster, MockEmbedding, OutboundMessage,
};

pub const SIGNING_SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

pub const CATALOG_CSV: &str = "\
Service Number,Service Name,Description,Portal URL,Request Type,Request Description,Request URL
12,Identity,Accounts and sign-in,https://portal/5,Reset Password,Forgot my password and need a reset,https://portal/5/reset
12,,Accounts and sign-in,https://portal/5,Unlock Account,Account locked after too many attempts,https://portal/5/unlock
30,Network,Remote connectivity,https://portal/9,VPN Access,Request VPN access for remote work,https://portal/9/vpn
30,Network,Remote connectivity,https://portal/9,Firewall Change,Open a firewall rule between networks,https://portal/9/firewall
40,Hardware,Devices,https://portal/11,New Laptop,Order a replacement laptop,https://portal/11/laptop
";

/// Writes `contents` to a temporary catalog with the given extension.
pub fn catalog_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("Failed to create temp catalog");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp catalog");
    file
}

/// Replies with the same canned answer to every question.
pub struct CannedAnswer(pub ExternalAnswer);

#[async_trait]
impl AnswerProvider for CannedAnswer {
    async fn answer(&self, _user_text: &str) -> ExternalAnswer {
        self.0.clone()
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct RecordingPoster {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingPoster {
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagePoster for RecordingPoster {
    async fn post(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct TestEnv {
    pub container: Container,
    pub poster: Arc<RecordingPoster>,
    // Keeps the catalog file alive for the container's lifetime.
    _catalog: NamedTempFile,
}

pub async fn setup_test_env(answer_provider: Arc<dyn AnswerProvider>) -> TestEnv {
    let catalog = catalog_file(CATALOG_CSV, "csv");
    let poster = Arc::new(RecordingPoster::default());

    let config = ContainerConfig {
        catalog_path: catalog.path().to_string_lossy().to_string(),
        mock_embeddings: true,
        slack_signing_secret: SIGNING_SECRET.to_string(),
        ..Default::default()
    };
    let container = Container::with_collaborators(
        config,
        Collaborators {
            embedding_service: Arc::new(MockEmbedding::new()),
            answer_provider,
            message_poster: poster.clone(),
            bot_user_id: Some("UBOT".to_string()),
        },
    )
    .await
    .expect("Failed to build container");

    TestEnv {
        container,
        poster,
        _catalog: catalog,
    }
}

pub async fn local_only_env() -> TestEnv {
    setup_test_env(Arc::new(DisabledAnswerProvider)).await
}
