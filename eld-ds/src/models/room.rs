//! Room analysis input model
//!
//! These types mirror the room detector's JSON output and are read-only to
//! the engine. Free-text fields (`dimensions`, `area`) carry a leading
//! numeric value that the engine extracts with `parse_leading_float`.

use crate::geometry::Bounds;
use serde::{Deserialize, Serialize};

/// Enumerated room category driving rule dispatch
///
/// Unrecognized categories are carried through as `Other` and synthesize an
/// empty design rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    Kitchen,
    Living,
    Bedroom,
    Bathroom,
    Office,
    Study,
    Dining,
    Other(String),
}

impl From<String> for RoomType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "kitchen" => RoomType::Kitchen,
            "living" => RoomType::Living,
            "bedroom" => RoomType::Bedroom,
            "bathroom" => RoomType::Bathroom,
            "office" => RoomType::Office,
            "study" => RoomType::Study,
            "dining" => RoomType::Dining,
            _ => RoomType::Other(tag),
        }
    }
}

impl From<RoomType> for String {
    fn from(room_type: RoomType) -> Self {
        room_type.as_str().to_string()
    }
}

impl RoomType {
    /// The wire-format tag for this category
    pub fn as_str(&self) -> &str {
        match self {
            RoomType::Kitchen => "kitchen",
            RoomType::Living => "living",
            RoomType::Bedroom => "bedroom",
            RoomType::Bathroom => "bathroom",
            RoomType::Office => "office",
            RoomType::Study => "study",
            RoomType::Dining => "dining",
            RoomType::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Furniture or appliance inside a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomObject {
    /// Object category tag (e.g. "kitchen_island", "bed", "desk")
    #[serde(rename = "type")]
    pub object_type: String,
    /// Center position in pixel coordinates
    pub position: [f64; 2],
    /// Free-text dimensions; the leading number is the object length in feet
    #[serde(default)]
    pub dimensions: String,
}

impl RoomObject {
    pub fn x(&self) -> f64 {
        self.position[0]
    }

    pub fn y(&self) -> f64 {
        self.position[1]
    }

    /// Leading numeric value of `dimensions`, the object length in feet
    pub fn length_ft(&self) -> Option<f64> {
        parse_leading_float(&self.dimensions)
    }
}

/// Door or window on a room boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomFeature {
    /// Feature category tag ("door" or "window")
    #[serde(rename = "type")]
    pub feature_type: String,
    /// Center position in pixel coordinates
    pub position: [f64; 2],
    /// Opening width in pixels
    pub width: f64,
}

/// One detected room: boundary, furniture and openings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier; assigned as `room_N` when the detector omits it
    #[serde(default)]
    pub id: String,
    /// Human-readable room name
    #[serde(default)]
    pub name: String,
    /// Room category tag
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Boundary rectangle in pixel coordinates
    pub boundary: Bounds,
    /// Free-text dimensions (e.g. "20x16 ft")
    #[serde(default)]
    pub dimensions: String,
    /// Free-text area; the leading number is square feet
    #[serde(default)]
    pub area: String,
    /// Furniture and appliances
    #[serde(default)]
    pub objects: Vec<RoomObject>,
    /// Doors and windows
    #[serde(default)]
    pub features: Vec<RoomFeature>,
}

impl Room {
    /// First object with the given category tag, if any
    pub fn find_object(&self, object_type: &str) -> Option<&RoomObject> {
        self.objects
            .iter()
            .find(|o| o.object_type == object_type)
    }
}

/// Whole-plan summary returned alongside the room list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_rooms: usize,
    pub building_type: String,
    pub total_area: String,
}

/// Room detector output: summary plus room list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomAnalysis {
    pub summary: AnalysisSummary,
    pub rooms: Vec<Room>,
}

impl RoomAnalysis {
    /// Look up a room by id
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Assign `room_N` identifiers to rooms the detector left without one
    pub fn assign_missing_ids(&mut self) {
        for (index, room) in self.rooms.iter_mut().enumerate() {
            if room.id.is_empty() {
                room.id = format!("room_{}", index + 1);
            }
        }
    }
}

/// Extract the leading numeric value of a free-text field
///
/// Matches JavaScript `parseFloat` semantics for the inputs this service
/// sees: leading whitespace skipped, an optional sign, digits with at most
/// one decimal point, parsing stops at the first other character.
/// `"320 sq ft"` → 320.0, `"8x4 ft"` → 8.0, `"2,100 sq ft"` → 2.0.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if i == 0 => end = i + 1,
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    trimmed[..end].parse().ok()
}
