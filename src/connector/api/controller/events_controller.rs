use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::{
    Admission, AdmitEventUseCase, InboundRequest, RespondToEventUseCase, SignedRequest,
    RETRY_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};

/// Shared state of the event intake endpoint.
#[derive(Clone)]
pub struct EventsController {
    admit_event: Arc<AdmitEventUseCase>,
    respond_to_event: Arc<RespondToEventUseCase>,
}

impl EventsController {
    pub fn new(
        admit_event: Arc<AdmitEventUseCase>,
        respond_to_event: Arc<RespondToEventUseCase>,
    ) -> Self {
        Self {
            admit_event,
            respond_to_event,
        }
    }

    /// Runs admission and, for accepted events, the full answer pipeline
    /// before acknowledging. Pipeline failures still acknowledge with 200.
    pub async fn receive(&self, headers: &HeaderMap, body: &[u8]) -> Response {
        let request = InboundRequest {
            signed: SignedRequest::new(
                header(headers, TIMESTAMP_HEADER),
                header(headers, SIGNATURE_HEADER),
                body,
            ),
            is_retry: header(headers, RETRY_HEADER).is_some_and(|v| !v.is_empty()),
        };

        match self.admit_event.execute(&request) {
            Admission::Rejected => (StatusCode::FORBIDDEN, "Bad signature").into_response(),
            Admission::Challenge(challenge) => Json(json!({ "challenge": challenge })).into_response(),
            Admission::Ignored(_) => StatusCode::OK.into_response(),
            Admission::Accepted(event) => {
                self.respond_to_event.handle(&event).await;
                StatusCode::OK.into_response()
            }
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub async fn slack_events(
    State(controller): State<EventsController>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    controller.receive(&headers, &body).await
}

pub async fn healthz() -> &'static str {
    "ok"
}
