//! Event types for the ELD event system
//!
//! Provides shared event definitions and the EventBus used to fan design
//! changes out to connected observers (SSE clients).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// ELD event types
///
/// Events are broadcast via EventBus and can be serialized for SSE
/// transmission. Delivery is fire-and-forget: a lost event never affects
/// engine state, and observers are expected to re-fetch on reconnect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EldEvent {
    /// A new session was created (first upload from a client)
    ///
    /// Triggers:
    /// - SSE: New observers may join the session room
    SessionCreated {
        /// Opaque session token
        session_id: String,
        /// When the session was created
        timestamp: DateTime<Utc>,
    },

    /// Floor plan analysis finished (detector result or demo fallback)
    ///
    /// Triggers:
    /// - SSE: Update room list display
    AnalysisCompleted {
        /// Session the analysis belongs to
        session_id: String,
        /// Number of rooms identified
        room_count: usize,
        /// Whether the fixed demo analysis was used instead of the detector
        demo_fallback: bool,
        /// When analysis completed
        timestamp: DateTime<Utc>,
    },

    /// A lighting design was synthesized for a room
    ///
    /// Triggers:
    /// - SSE: Render the fixture layout
    DesignGenerated {
        /// Session the design belongs to
        session_id: String,
        /// Room the design covers
        room_id: String,
        /// Number of fixtures placed
        fixture_count: usize,
        /// Total cost of the design in whole currency units
        total_cost: u64,
        /// When synthesis completed
        timestamp: DateTime<Utc>,
    },

    /// An existing design was mutated through chat
    ///
    /// Triggers:
    /// - SSE: Re-render the fixture layout and metrics
    DesignUpdated {
        /// Session the design belongs to
        session_id: String,
        /// Room the design covers
        room_id: String,
        /// Number of fixtures after the mutation
        fixture_count: usize,
        /// Total cost after the mutation in whole currency units
        total_cost: u64,
        /// When the mutation was applied
        timestamp: DateTime<Utc>,
    },
}

impl EldEvent {
    /// Stable event-name string used as the SSE event type
    pub fn event_type(&self) -> &str {
        match self {
            EldEvent::SessionCreated { .. } => "SessionCreated",
            EldEvent::AnalysisCompleted { .. } => "AnalysisCompleted",
            EldEvent::DesignGenerated { .. } => "DesignGenerated",
            EldEvent::DesignUpdated { .. } => "DesignUpdated",
        }
    }

    /// Session the event belongs to
    pub fn session_id(&self) -> &str {
        match self {
            EldEvent::SessionCreated { session_id, .. }
            | EldEvent::AnalysisCompleted { session_id, .. }
            | EldEvent::DesignGenerated { session_id, .. }
            | EldEvent::DesignUpdated { session_id, .. } => session_id,
        }
    }
}

/// Broadcast bus for ELD events
///
/// Wraps a tokio broadcast channel. Subscribers receive every event emitted
/// after subscription; events emitted with no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<EldEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    ///
    /// # Examples
    ///
    /// ```
    /// use eld_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Returns a receiver that will receive all events emitted after
    /// subscription. Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<EldEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: EldEvent,
    ) -> Result<usize, broadcast::error::SendError<EldEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    ///
    /// Design-change notifications are non-critical: it is acceptable if no
    /// observer is currently connected.
    pub fn emit_lossy(&self, event: EldEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names_are_stable() {
        let event = EldEvent::DesignGenerated {
            session_id: "s1".to_string(),
            room_id: "room_1".to_string(),
            fixture_count: 7,
            total_cost: 1250,
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type(), "DesignGenerated");
        assert_eq!(event.session_id(), "s1");
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = EldEvent::DesignUpdated {
            session_id: "s1".to_string(),
            room_id: "room_2".to_string(),
            fixture_count: 3,
            total_cost: 525,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&event).expect("event serialization should succeed");
        assert!(json.contains("\"type\":\"DesignUpdated\""));
        assert!(json.contains("\"room_id\":\"room_2\""));

        let back: EldEvent =
            serde_json::from_str(&json).expect("event deserialization should succeed");
        assert_eq!(back.event_type(), "DesignUpdated");
    }

    #[tokio::test]
    async fn test_bus_delivers_to_subscribers() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let sent = bus.emit(EldEvent::SessionCreated {
            session_id: "abc".to_string(),
            timestamp: Utc::now(),
        });
        assert_eq!(sent.unwrap(), 1);

        let received = rx.recv().await.expect("subscriber should receive event");
        assert_eq!(received.event_type(), "SessionCreated");
    }

    #[test]
    fn test_emit_lossy_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        assert_eq!(bus.subscriber_count(), 0);

        // Must not panic or error
        bus.emit_lossy(EldEvent::SessionCreated {
            session_id: "nobody-listening".to_string(),
            timestamp: Utc::now(),
        });
    }
}
