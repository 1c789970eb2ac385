use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::payload::{compose_prompt, format_instruction, PayloadShape};
use super::response::parse_response;
use crate::application::AnswerProvider;
use crate::domain::{DomainError, ExternalAnswer, LinkPolicy};

pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(4);

/// Connection settings for a model serving endpoint.
#[derive(Debug, Clone, Default)]
pub struct ServingEndpointConfig {
    pub enabled: bool,
    pub host: String,
    pub endpoint: String,
    pub token: String,
}

impl ServingEndpointConfig {
    /// Usable only when switched on and every connection setting is present.
    pub fn is_complete(&self) -> bool {
        self.enabled && !self.host.is_empty() && !self.endpoint.is_empty() && !self.token.is_empty()
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), self.endpoint)
    }
}

/// [`AnswerProvider`] backed by an HTTP model serving endpoint.
///
/// Each payload shape is a separate attempt with its own timeout. Attempts
/// run one after another and stop at the first response with text; every
/// failure just moves on to the next shape.
pub struct ServingEndpointClient {
    client: reqwest::Client,
    config: ServingEndpointConfig,
    instruction: String,
}

impl ServingEndpointClient {
    pub fn new(config: ServingEndpointConfig, link_policy: &LinkPolicy) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(ATTEMPT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            config,
            instruction: format_instruction(link_policy),
        }
    }

    async fn attempt(&self, url: &str, body: &Value) -> Result<ExternalAnswer, DomainError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.token)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::transport(format!("endpoint returned {status}")));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| DomainError::transport(format!("failed to parse response: {e}")))?;

        Ok(parse_response(&data))
    }
}

#[async_trait]
impl AnswerProvider for ServingEndpointClient {
    async fn answer(&self, user_text: &str) -> ExternalAnswer {
        if !self.is_enabled() {
            return ExternalAnswer::empty();
        }

        let url = self.config.url();
        let prompt = compose_prompt(&self.instruction, user_text);

        for shape in PayloadShape::ATTEMPT_ORDER {
            match self.attempt(&url, &shape.body(&prompt)).await {
                Ok(answer) if answer.has_text() => {
                    debug!("Serving endpoint answered with {} payload", shape.as_str());
                    return answer;
                }
                Ok(_) => debug!("Serving endpoint gave no text for {} payload", shape.as_str()),
                Err(e) => warn!("Serving endpoint {} attempt failed: {}", shape.as_str(), e),
            }
        }

        info!("Serving endpoint produced no usable answer");
        ExternalAnswer::empty()
    }

    fn is_enabled(&self) -> bool {
        self.config.is_complete()
    }
}

/// Provider used when no external model is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAnswerProvider;

#[async_trait]
impl AnswerProvider for DisabledAnswerProvider {
    async fn answer(&self, _user_text: &str) -> ExternalAnswer {
        ExternalAnswer::empty()
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
