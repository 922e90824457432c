//! Lighting design model: placed fixtures, reasoning log, derived metrics
//!
//! A `Design` is owned by exactly one (session, room) pair. Its metrics and
//! total cost are always a pure function of the current fixture sequence:
//! every mutation path recomputes them before the design is stored or
//! returned, so an externally observed design is never stale.

use crate::geometry::Point;
use crate::models::room::RoomType;
use serde::{Deserialize, Serialize};

/// One placed lighting fixture
///
/// `kind` must name a catalog entry. `length` is only meaningful for linear
/// kinds and defaults to the nominal run length when absent. The remaining
/// optional fields are free-text annotations for explanation output; no
/// engine invariant depends on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    /// Identifier unique within the owning design
    pub id: String,
    /// Catalog kind name
    #[serde(rename = "type")]
    pub kind: String,
    /// Placement in pixel coordinates
    pub position: Point,
    /// Run length in feet (linear kinds only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aim_angle: Option<f64>,
}

impl Fixture {
    /// New fixture with no annotations
    pub fn new(id: impl Into<String>, kind: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position,
            length: None,
            purpose: None,
            placement: None,
            height: None,
            mounting: None,
            rating: None,
            aim_angle: None,
        }
    }
}

/// One entry in the design's append-only reasoning log
///
/// `topic` is either a fixture kind name or the literal "overall". Entries
/// are only ever appended, in insertion order; nothing rewrites or removes
/// them, so rationale written at synthesis time survives every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningEntry {
    pub topic: String,
    pub message: String,
}

impl ReasoningEntry {
    pub fn new(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            message: message.into(),
        }
    }
}

/// Engineering metrics derived from a fixture sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingMetrics {
    /// Total power draw in watts
    pub total_watts: f64,
    /// Total luminous output in lumens
    pub total_lumens: f64,
    /// Power density over the room area
    pub watts_per_sqft: f64,
    /// Luminous density over the room area, rounded
    pub lumens_per_sqft: i64,
    /// Whether power density is within the 1.2 W/sqft energy code limit
    pub meets_energy_code: bool,
}

/// Complete lighting design for one room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    pub room_id: String,
    pub room_name: String,
    pub room_type: RoomType,
    /// Placed fixtures; insertion order is the display and removal order
    pub fixtures: Vec<Fixture>,
    /// Append-only rationale log
    pub reasoning: Vec<ReasoningEntry>,
    /// Derived metrics, recomputed after every mutation
    pub metrics: LightingMetrics,
    /// Derived total cost in whole currency units, recomputed with metrics
    pub total_cost: u64,
}

impl Design {
    /// Number of fixtures of the given kind
    pub fn count_of(&self, kind: &str) -> usize {
        self.fixtures.iter().filter(|f| f.kind == kind).count()
    }

    /// Distinct fixture kinds in first-appearance order
    pub fn kinds_in_order(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = Vec::new();
        for fixture in &self.fixtures {
            if !kinds.contains(&fixture.kind.as_str()) {
                kinds.push(&fixture.kind);
            }
        }
        kinds
    }
}
