use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::application::MessagePoster;
use crate::domain::{DomainError, OutboundMessage};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

/// Minimal Slack Web API client: `chat.postMessage` and `auth.test`.
pub struct SlackWebClient {
    client: reqwest::Client,
    token: String,
    api_base: String,
}

impl SlackWebClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        let base: String = api_base.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            token: token.into(),
            api_base: base.trim_end_matches('/').to_string(),
        }
    }

    async fn call<T: serde::Serialize + ?Sized>(
        &self,
        method: &str,
        body: &T,
    ) -> Result<ApiResponse, DomainError> {
        let url = format!("{}/{}", self.api_base, method);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::messaging(format!("{method}: request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::messaging(format!(
                "{method}: API returned {}",
                response.status()
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::messaging(format!("{method}: failed to parse response: {e}")))?;

        if !api_response.ok {
            return Err(DomainError::messaging(format!(
                "{method}: {}",
                api_response.error.as_deref().unwrap_or("unknown error")
            )));
        }

        Ok(api_response)
    }

    /// Looks up the bot's own user id.
    pub async fn auth_test(&self) -> Result<String, DomainError> {
        let response = self.call("auth.test", &serde_json::json!({})).await?;
        let user_id = response
            .user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::messaging("auth.test: no user_id in response"))?;

        info!("Bot user id: {}", user_id);
        Ok(user_id)
    }

    /// Bot user id, or `None` with a warning when discovery fails. Own
    /// messages are then only filtered by `bot_id` and subtype.
    pub async fn discover_bot_user_id(&self) -> Option<String> {
        match self.auth_test().await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("auth.test failed; own-message filtering may be incomplete: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl MessagePoster for SlackWebClient {
    async fn post(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        self.call("chat.postMessage", message).await?;
        debug!("Posted reply to channel {}", message.channel);
        Ok(())
    }
}
