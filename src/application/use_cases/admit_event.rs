use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use crate::application::{RequestAuthenticator, SignedRequest};
use crate::domain::{EventEnvelope, InboundEvent, ProcessedEventCache};

/// Why an authentic request was dropped without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Retry,
    Duplicate,
    NotEventCallback,
    FromBot,
    SelfAuthored,
    EditedOrDeleted,
    BotMessage,
    UnsupportedEventType,
    MissingFields,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::Retry => "platform retry",
            IgnoreReason::Duplicate => "duplicate event id",
            IgnoreReason::NotEventCallback => "not an event callback",
            IgnoreReason::FromBot => "sent by a bot",
            IgnoreReason::SelfAuthored => "sent by this bot",
            IgnoreReason::EditedOrDeleted => "edited or deleted message",
            IgnoreReason::BotMessage => "bot_message subtype",
            IgnoreReason::UnsupportedEventType => "unsupported event type",
            IgnoreReason::MissingFields => "missing user, text or channel",
        }
    }
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of running an inbound request through the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Authentication failed.
    Rejected,
    /// URL verification handshake; echo the challenge.
    Challenge(Value),
    Ignored(IgnoreReason),
    Accepted(InboundEvent),
}

/// Raw inbound request as seen by the gate.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    pub signed: SignedRequest<'a>,
    pub is_retry: bool,
}

/// Authenticates, deduplicates and filters inbound events.
///
/// Checks run in a fixed order: signature, retry header, URL verification,
/// event id dedupe, then the event filters. Dedupe records an id before the
/// filters run, so a later copy of a filtered event is also a duplicate.
pub struct AdmitEventUseCase {
    authenticator: Arc<dyn RequestAuthenticator>,
    processed: Mutex<ProcessedEventCache>,
    bot_user_id: Option<String>,
}

impl AdmitEventUseCase {
    pub fn new(authenticator: Arc<dyn RequestAuthenticator>, capacity: usize) -> Self {
        Self {
            authenticator,
            processed: Mutex::new(ProcessedEventCache::new(capacity)),
            bot_user_id: None,
        }
    }

    pub fn with_bot_user_id(mut self, bot_user_id: Option<String>) -> Self {
        self.bot_user_id = bot_user_id.filter(|id| !id.is_empty());
        self
    }

    pub fn execute(&self, request: &InboundRequest<'_>) -> Admission {
        if !self.authenticator.verify(&request.signed) {
            debug!("Rejected request with bad signature");
            return Admission::Rejected;
        }

        let admission = self.admit_authentic(request);
        if let Admission::Ignored(reason) = &admission {
            debug!("Ignored event: {}", reason);
        }
        admission
    }

    fn admit_authentic(&self, request: &InboundRequest<'_>) -> Admission {
        if request.is_retry {
            return Admission::Ignored(IgnoreReason::Retry);
        }

        let envelope = EventEnvelope::parse(request.signed.body);
        if envelope.is_url_verification() {
            if let Some(challenge) = envelope.challenge.clone() {
                return Admission::Challenge(challenge);
            }
        }

        if let Some(event_id) = envelope.event_id.as_deref().filter(|id| !id.is_empty()) {
            if !self.record(event_id) {
                return Admission::Ignored(IgnoreReason::Duplicate);
            }
        }

        if !envelope.is_event_callback() {
            return Admission::Ignored(IgnoreReason::NotEventCallback);
        }
        let payload = envelope.event.unwrap_or_default();

        if payload.is_from_bot() {
            return Admission::Ignored(IgnoreReason::FromBot);
        }
        if self.bot_user_id.is_some() && payload.user == self.bot_user_id {
            return Admission::Ignored(IgnoreReason::SelfAuthored);
        }
        if payload.is_edited_or_deleted() {
            return Admission::Ignored(IgnoreReason::EditedOrDeleted);
        }
        if payload.has_ignored_subtype() {
            return Admission::Ignored(IgnoreReason::BotMessage);
        }
        if !payload.is_answerable_type() {
            return Admission::Ignored(IgnoreReason::UnsupportedEventType);
        }

        match InboundEvent::from_payload(envelope.event_id, &payload) {
            Some(event) => Admission::Accepted(event),
            None => Admission::Ignored(IgnoreReason::MissingFields),
        }
    }

    /// Check-and-insert under one lock. Returns `false` for a seen id.
    fn record(&self, event_id: &str) -> bool {
        let mut processed = self
            .processed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        processed.check_and_insert(event_id)
    }

    pub fn processed_count(&self) -> usize {
        self.processed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
