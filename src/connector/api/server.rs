use std::net::SocketAddr;

use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::container::Container;
use super::controller::{healthz, slack_events, EventsController};
use crate::domain::DomainError;

pub const EVENTS_PATH: &str = "/slack/events";
pub const HEALTH_PATH: &str = "/healthz";

/// HTTP routes: health check and the event intake endpoint.
pub fn build_app(container: &Container) -> axum::Router {
    let events = EventsController::new(
        container.admit_event_use_case(),
        container.respond_to_event_use_case(),
    );

    axum::Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(EVENTS_PATH, post(slack_events))
        .with_state(events)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(container: &Container, host: &str, port: u16) -> Result<(), DomainError> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| DomainError::invalid_input(format!("Invalid address {}:{}: {}", host, port, e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening for events on http://{}{}", addr, EVENTS_PATH);

    axum::serve(listener, build_app(container))
        .await
        .map_err(|e| DomainError::internal(format!("Server error: {}", e)))
}
