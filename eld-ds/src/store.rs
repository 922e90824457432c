//! In-memory session store
//!
//! A process-wide `session id -> DesignSession` mapping with an explicit
//! create/get/update/evict lifecycle, injected through `AppState` rather
//! than living in a global. There is no automatic eviction and no
//! persistence: sessions last for the process lifetime.
//!
//! Concurrency: each store operation takes the lock for the duration of one
//! read or one write, so individual operations are atomic. Two concurrent
//! mutation requests against the same (session, room) pair still race at the
//! design level: last write wins, no merge. An accepted limitation of the
//! single-user interactive use case; per-design locking would change the
//! observable semantics.

use crate::models::design::Design;
use crate::models::room::{Room, RoomAnalysis};
use crate::models::session::DesignSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the session map
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, DesignSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a session if it exists
    pub async fn get(&self, session_id: &str) -> Option<DesignSession> {
        self.inner.read().await.get(session_id).cloned()
    }

    /// Fetch a session, creating it first if absent
    pub async fn get_or_create(&self, session_id: &str) -> DesignSession {
        let mut sessions = self.inner.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| DesignSession::new(session_id))
            .clone()
    }

    /// Replace a session's room analysis, resetting its designs
    ///
    /// A fresh upload invalidates every design generated against the
    /// previous analysis. Creates the session when absent.
    pub async fn insert_analysis(&self, session_id: &str, analysis: RoomAnalysis) {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| DesignSession::new(session_id));
        session.analysis = Some(analysis);
        session.designs.clear();
    }

    /// Look up an analyzed room within a session
    pub async fn room(&self, session_id: &str, room_id: &str) -> Option<Room> {
        self.inner
            .read()
            .await
            .get(session_id)
            .and_then(|s| s.room(room_id))
            .cloned()
    }

    /// Look up the current design for a room within a session
    pub async fn design(&self, session_id: &str, room_id: &str) -> Option<Design> {
        self.inner
            .read()
            .await
            .get(session_id)
            .and_then(|s| s.design(room_id))
            .cloned()
    }

    /// Store (or overwrite) the design for a room
    ///
    /// Returns false when the session does not exist; designs are never
    /// stored outside a session.
    pub async fn put_design(&self, session_id: &str, room_id: &str, design: Design) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.designs.insert(room_id.to_string(), design);
                true
            }
            None => false,
        }
    }

    /// Remove a session entirely
    pub async fn evict(&self, session_id: &str) -> bool {
        self.inner.write().await.remove(session_id).is_some()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room::AnalysisSummary;

    fn analysis_with_room(room_id: &str) -> RoomAnalysis {
        let room_json = format!(
            r#"{{ "id": "{}", "name": "Kitchen", "type": "kitchen", "boundary": [0, 0, 100, 100] }}"#,
            room_id
        );
        RoomAnalysis {
            summary: AnalysisSummary {
                total_rooms: 1,
                building_type: "residential".to_string(),
                total_area: "100 sq ft".to_string(),
            },
            rooms: vec![serde_json::from_str(&room_json).unwrap()],
        }
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = SessionStore::new();
        assert!(store.get("s1").await.is_none());

        let first = store.get_or_create("s1").await;
        let second = store.get_or_create("s1").await;
        assert_eq!(first.session_id, second.session_id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_analysis_resets_designs() {
        let store = SessionStore::new();
        store.insert_analysis("s1", analysis_with_room("room_1")).await;
        assert!(store.room("s1", "room_1").await.is_some());

        let room = store.room("s1", "room_1").await.unwrap();
        let catalog = crate::catalog::Catalog::standard();
        let design = crate::services::synthesizer::synthesize(&catalog, &room);
        assert!(store.put_design("s1", "room_1", design).await);
        assert!(store.design("s1", "room_1").await.is_some());

        // Fresh analysis invalidates the stored design
        store.insert_analysis("s1", analysis_with_room("room_9")).await;
        assert!(store.design("s1", "room_1").await.is_none());
        assert!(store.room("s1", "room_9").await.is_some());
    }

    #[tokio::test]
    async fn test_put_design_requires_session() {
        let store = SessionStore::new();
        let catalog = crate::catalog::Catalog::standard();
        let analysis = analysis_with_room("room_1");
        let design = crate::services::synthesizer::synthesize(&catalog, &analysis.rooms[0]);

        assert!(!store.put_design("missing", "room_1", design).await);
    }

    #[tokio::test]
    async fn test_evict() {
        let store = SessionStore::new();
        store.get_or_create("s1").await;
        assert!(store.evict("s1").await);
        assert!(!store.evict("s1").await);
        assert!(store.is_empty().await);
    }
}
