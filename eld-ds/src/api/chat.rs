//! Chat endpoint: free-text design adjustments
//!
//! POST /api/chat classifies the message, applies the resulting intent to
//! the room's current design, and stores the updated design when the intent
//! mutated it. Informational intents answer from current design state
//! without touching it.

use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use chrono::Utc;
use eld_common::events::EldEvent;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::design::Design;
use crate::services::intent::classify;
use crate::services::mutation::{respond, ChatOutcome};
use crate::AppState;

/// POST /api/chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub room_id: String,
    pub message: String,
}

/// POST /api/chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Present only when the message mutated the design
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<Design>,
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Chat message must not be empty".to_string(),
        ));
    }

    let session_id = super::session_id_from(&headers)
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    if state.store.get(&session_id).await.is_none() {
        return Err(ApiError::NotFound("Session not found".to_string()));
    }

    let room = state
        .store
        .room(&session_id, &request.room_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Room not found: {}", request.room_id)))?;

    let design = state
        .store
        .design(&session_id, &request.room_id)
        .await
        .ok_or_else(|| {
            ApiError::NotFound(format!("No design for room: {}", request.room_id))
        })?;

    let intent = classify(&request.message);
    tracing::debug!(
        session_id = %session_id,
        room_id = %request.room_id,
        intent = ?intent,
        "Classified chat message"
    );

    match respond(&state.catalog, &room, &design, intent) {
        ChatOutcome::Updated { design, reply } => {
            state
                .store
                .put_design(&session_id, &request.room_id, design.clone())
                .await;

            state.event_bus.emit_lossy(EldEvent::DesignUpdated {
                session_id: session_id.clone(),
                room_id: request.room_id.clone(),
                fixture_count: design.fixtures.len(),
                total_cost: design.total_cost,
                timestamp: Utc::now(),
            });

            Ok(Json(ChatResponse {
                reply,
                design: Some(design),
            }))
        }
        ChatOutcome::Reply(reply) => Ok(Json(ChatResponse {
            reply,
            design: None,
        })),
    }
}

/// Build chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/chat", post(chat))
}
