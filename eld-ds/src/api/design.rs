//! Design synthesis endpoints
//!
//! POST /api/design synthesizes (or re-synthesizes) the layout for one room;
//! POST /api/design/batch covers several rooms in one call; GET
//! /api/design/:room_id returns the stored design for observers.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use eld_common::events::EldEvent;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::design::Design;
use crate::services::synthesizer::synthesize;
use crate::AppState;

/// POST /api/design request
#[derive(Debug, Deserialize)]
pub struct GenerateDesignRequest {
    pub room_id: String,
}

/// POST /api/design response
#[derive(Debug, Serialize)]
pub struct DesignResponse {
    pub session_id: String,
    pub design: Design,
}

/// POST /api/design/batch response
#[derive(Debug, Serialize)]
pub struct BatchDesignResponse {
    pub session_id: String,
    pub designs: Vec<Design>,
}

fn require_session_id(headers: &HeaderMap) -> ApiResult<String> {
    super::session_id_from(headers)
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))
}

async fn generate_for_room(
    state: &AppState,
    session_id: &str,
    room_id: &str,
) -> ApiResult<Design> {
    let room = state
        .store
        .room(session_id, room_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Room not found: {}", room_id)))?;

    let design = synthesize(&state.catalog, &room);
    state.store.put_design(session_id, room_id, design.clone()).await;

    state.event_bus.emit_lossy(EldEvent::DesignGenerated {
        session_id: session_id.to_string(),
        room_id: room_id.to_string(),
        fixture_count: design.fixtures.len(),
        total_cost: design.total_cost,
        timestamp: Utc::now(),
    });

    tracing::info!(
        session_id = %session_id,
        room_id = %room_id,
        fixtures = design.fixtures.len(),
        total_cost = design.total_cost,
        "Lighting design generated"
    );

    Ok(design)
}

/// POST /api/design
pub async fn generate_design(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateDesignRequest>,
) -> ApiResult<Json<DesignResponse>> {
    let session_id = require_session_id(&headers)?;

    if state.store.get(&session_id).await.is_none() {
        return Err(ApiError::NotFound("Session not found".to_string()));
    }

    let design = generate_for_room(&state, &session_id, &request.room_id).await?;

    Ok(Json(DesignResponse { session_id, design }))
}

/// POST /api/design/batch
///
/// The payload must be a JSON array of room ids; anything else is rejected
/// up front and no designs are generated. Every listed room is validated
/// before the first design is stored so a bad entry cannot leave the batch
/// half-applied.
pub async fn generate_designs_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> ApiResult<Json<BatchDesignResponse>> {
    let session_id = require_session_id(&headers)?;

    if state.store.get(&session_id).await.is_none() {
        return Err(ApiError::NotFound("Session not found".to_string()));
    }

    let entries = payload
        .as_array()
        .ok_or_else(|| {
            ApiError::BadRequest("Batch payload must be a list of room ids".to_string())
        })?;

    let mut room_ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let room_id = entry.as_str().ok_or_else(|| {
            ApiError::BadRequest("Batch payload must contain only room id strings".to_string())
        })?;
        room_ids.push(room_id.to_string());
    }

    for room_id in &room_ids {
        if state.store.room(&session_id, room_id).await.is_none() {
            return Err(ApiError::NotFound(format!("Room not found: {}", room_id)));
        }
    }

    let mut designs = Vec::with_capacity(room_ids.len());
    for room_id in &room_ids {
        designs.push(generate_for_room(&state, &session_id, room_id).await?);
    }

    Ok(Json(BatchDesignResponse { session_id, designs }))
}

/// GET /api/design/:room_id
pub async fn get_design(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> ApiResult<Json<DesignResponse>> {
    let session_id = require_session_id(&headers)?;

    let design = state
        .store
        .design(&session_id, &room_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No design for room: {}", room_id)))?;

    Ok(Json(DesignResponse { session_id, design }))
}

/// Build design routes
pub fn design_routes() -> Router<AppState> {
    Router::new()
        .route("/api/design", post(generate_design))
        .route("/api/design/batch", post(generate_designs_batch))
        .route("/api/design/:room_id", get(get_design))
}
