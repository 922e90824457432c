//! Per-session state: one room analysis plus one design per room

use crate::models::design::Design;
use crate::models::room::{Room, RoomAnalysis};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// State held for one client session
///
/// Created on first use and kept for process lifetime; there is no
/// persistence across restarts and no cross-session sharing.
#[derive(Debug, Clone)]
pub struct DesignSession {
    /// Opaque session token
    pub session_id: String,
    /// Latest floor plan analysis, absent until the first upload completes
    pub analysis: Option<RoomAnalysis>,
    /// One design per analyzed room, keyed by room id
    pub designs: HashMap<String, Design>,
    /// Session creation time
    pub created_at: DateTime<Utc>,
}

impl DesignSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            analysis: None,
            designs: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Look up an analyzed room by id
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.analysis.as_ref().and_then(|a| a.room(room_id))
    }

    /// Look up the current design for a room
    pub fn design(&self, room_id: &str) -> Option<&Design> {
        self.designs.get(room_id)
    }
}
