use serde::Deserialize;

pub const URL_VERIFICATION: &str = "url_verification";
pub const EVENT_CALLBACK: &str = "event_callback";

/// Inner event subtypes that never reach the answer pipeline.
pub const IGNORED_SUBTYPES: [&str; 3] = ["message_changed", "message_deleted", "bot_message"];

/// Inner event types the bot answers.
pub const ANSWERED_EVENT_TYPES: [&str; 2] = ["app_mention", "message"];

/// Outer JSON envelope posted by the messaging platform.
///
/// Every field is optional: a body that is not a JSON object decodes to the
/// default envelope and is ignored further down.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub envelope_type: Option<String>,
    pub challenge: Option<serde_json::Value>,
    pub event_id: Option<String>,
    pub event: Option<EventPayload>,
}

/// The `event` object inside an `event_callback` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub subtype: Option<String>,
    pub bot_id: Option<String>,
    pub user: Option<String>,
    pub text: Option<String>,
    pub channel: Option<String>,
}

impl EventEnvelope {
    /// Decodes a raw body leniently; malformed JSON yields an empty envelope.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn is_url_verification(&self) -> bool {
        self.envelope_type.as_deref() == Some(URL_VERIFICATION) && self.challenge.is_some()
    }

    pub fn is_event_callback(&self) -> bool {
        self.envelope_type.as_deref() == Some(EVENT_CALLBACK)
    }
}

impl EventPayload {
    pub fn is_from_bot(&self) -> bool {
        self.bot_id.as_deref().is_some_and(|b| !b.is_empty())
    }

    pub fn is_edited_or_deleted(&self) -> bool {
        self.event_type.as_deref() == Some("message")
            && matches!(
                self.subtype.as_deref(),
                Some("message_changed") | Some("message_deleted")
            )
    }

    pub fn has_ignored_subtype(&self) -> bool {
        self.subtype
            .as_deref()
            .is_some_and(|s| IGNORED_SUBTYPES.contains(&s))
    }

    pub fn is_answerable_type(&self) -> bool {
        self.event_type
            .as_deref()
            .is_some_and(|t| ANSWERED_EVENT_TYPES.contains(&t))
    }
}

/// A user message that passed admission, ready for the answer pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub event_id: Option<String>,
    pub user: String,
    pub text: String,
    pub channel: String,
}

impl InboundEvent {
    /// Builds an event from a payload, trimming the text. `None` when user,
    /// text, or channel is missing or blank.
    pub fn from_payload(event_id: Option<String>, payload: &EventPayload) -> Option<Self> {
        let user = payload.user.as_deref().filter(|u| !u.is_empty())?;
        let channel = payload.channel.as_deref().filter(|c| !c.is_empty())?;
        let text = payload.text.as_deref().map(str::trim).filter(|t| !t.is_empty())?;

        Some(Self {
            event_id,
            user: user.to_string(),
            text: text.to_string(),
            channel: channel.to_string(),
        })
    }
}
