//! eld-ds library interface
//!
//! The Design Synthesis service: turns analyzed rooms into lighting fixture
//! layouts, keeps per-session designs consistent through chat-driven
//! mutations, and fans design changes out to observers over SSE.

pub mod api;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod models;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use eld_common::events::EventBus;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;
use crate::services::room_detector::RoomDetector;
use crate::store::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Session store (analysis + designs per session)
    pub store: SessionStore,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Immutable fixture catalog shared by reference
    pub catalog: Arc<Catalog>,
    /// Room detector client with demo fallback
    pub detector: Arc<RoomDetector>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(event_bus: EventBus, detector: RoomDetector) -> Self {
        Self {
            store: SessionStore::new(),
            event_bus,
            catalog: Arc::new(Catalog::standard()),
            detector: Arc::new(detector),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::analyze_routes())
        .merge(api::design_routes())
        .merge(api::chat_routes())
        .route("/events", get(api::event_stream))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
