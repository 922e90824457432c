//! Floor plan analysis endpoint
//!
//! POST /api/analyze bootstraps a session: it forwards the uploaded image to
//! the room detector (or the demo fallback when none is configured), stores
//! the resulting analysis in the session, and returns the room list for the
//! client to pick from.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use base64::Engine;
use chrono::Utc;
use eld_common::events::EldEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::room::{AnalysisSummary, Room};
use crate::AppState;

/// Uploaded images larger than this are rejected before any work happens
const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// POST /api/analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64-encoded floor plan image, forwarded to the detector
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    1200
}

/// POST /api/analyze response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: String,
    pub summary: AnalysisSummary,
    pub rooms: Vec<Room>,
    /// True when the demo room set stands in for the detector
    pub demo_fallback: bool,
}

/// POST /api/analyze
///
/// The session token comes from the X-Session-Id header; a fresh one is
/// generated when absent so first-time clients need no handshake.
pub async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let session_id =
        super::session_id_from(&headers).unwrap_or_else(|| Uuid::new_v4().to_string());

    // Sanity-check the payload before the detector round trip
    if let Some(image) = &request.image_base64 {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(image)
            .map_err(|_| ApiError::BadRequest("image_base64 is not valid base64".to_string()))?;
        if decoded.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::BadRequest(format!(
                "Image exceeds the {} MB limit",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }
    }

    let is_new_session = state.store.get(&session_id).await.is_none();
    if is_new_session {
        state.store.get_or_create(&session_id).await;
        state.event_bus.emit_lossy(EldEvent::SessionCreated {
            session_id: session_id.clone(),
            timestamp: Utc::now(),
        });
    }

    let outcome = state
        .detector
        .analyze(request.image_base64.as_deref(), request.width, request.height)
        .await;

    state
        .store
        .insert_analysis(&session_id, outcome.analysis.clone())
        .await;

    state.event_bus.emit_lossy(EldEvent::AnalysisCompleted {
        session_id: session_id.clone(),
        room_count: outcome.analysis.rooms.len(),
        demo_fallback: outcome.demo_fallback,
        timestamp: Utc::now(),
    });

    tracing::info!(
        session_id = %session_id,
        rooms = outcome.analysis.rooms.len(),
        demo_fallback = outcome.demo_fallback,
        "Floor plan analysis stored"
    );

    Ok(Json(AnalyzeResponse {
        session_id,
        summary: outcome.analysis.summary,
        rooms: outcome.analysis.rooms,
        demo_fallback: outcome.demo_fallback,
    }))
}

/// Build analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze))
}
