//! Server-Sent Events (SSE) for design-change fan-out
//!
//! Replaces per-connection push with a broadcast subscription: every design
//! change emitted on the EventBus is forwarded to connected clients.
//! Delivery is fire-and-forget with no effect on engine state; a client that
//! misses events re-fetches the design instead.

use crate::AppState;
use axum::{
    extract::{Query, State},
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info, warn};

/// GET /events query parameters
#[derive(Debug, Deserialize)]
pub struct EventStreamParams {
    /// Restrict the stream to one session's events
    #[serde(default)]
    pub session_id: Option<String>,
}

/// GET /events - SSE stream of design events
///
/// Streams events:
/// - SessionCreated
/// - AnalysisCompleted
/// - DesignGenerated
/// - DesignUpdated
///
/// With `?session_id=...` only that session's events are forwarded,
/// mirroring a client joining its session room.
pub async fn event_stream(
    State(state): State<AppState>,
    Query(params): Query<EventStreamParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(
        session_filter = params.session_id.as_deref().unwrap_or("(all)"),
        "New SSE client connected"
    );

    // Subscribe to event broadcast
    let mut rx = state.event_bus.subscribe();

    let stream = async_stream::stream! {
        loop {
            tokio::select! {
                // Heartbeat every 15 seconds
                _ = tokio::time::sleep(Duration::from_secs(15)) => {
                    debug!("SSE: Sending heartbeat");
                    yield Ok(Event::default().comment("heartbeat"));
                }

                // Broadcast events
                Ok(event) = rx.recv() => {
                    if let Some(wanted) = &params.session_id {
                        if event.session_id() != wanted {
                            continue;
                        }
                    }

                    let event_type = event.event_type().to_string();
                    match serde_json::to_string(&event) {
                        Ok(event_json) => {
                            debug!("SSE: Broadcasting event: {}", event_type);
                            yield Ok(Event::default()
                                .event(event_type)
                                .data(event_json));
                        }
                        Err(e) => {
                            warn!("SSE: Failed to serialize event {}: {}", event_type, e);
                        }
                    }
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
