//! HTTP API handlers for eld-ds
//!
//! REST endpoints for analysis, design synthesis and chat, plus the SSE
//! event stream for design-change fan-out.

pub mod analyze;
pub mod chat;
pub mod design;
pub mod health;
pub mod sse;

pub use analyze::analyze_routes;
pub use chat::chat_routes;
pub use design::design_routes;
pub use health::health_routes;
pub use sse::event_stream;

use axum::http::HeaderMap;

/// Session token from the X-Session-Id header, if present and readable
pub fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}
