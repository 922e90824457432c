//! Room detector client
//!
//! The detector is an external, long-latency service that turns a floor plan
//! image into a structured room list. Calls are bounded by a request timeout
//! and every failure path (unconfigured endpoint, network error, bad status,
//! unparseable body) recovers locally by falling back to the fixed demo
//! analysis. Detector trouble is never surfaced to the caller as a hard
//! failure.

use crate::models::room::{AnalysisSummary, Room, RoomAnalysis};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Detector client errors (internal; callers see the demo fallback instead)
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("No detector endpoint configured")]
    Unconfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Detector API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Request payload forwarded to the detector
#[derive(Debug, Serialize)]
struct DetectorRequest<'a> {
    image_base64: Option<&'a str>,
    width: u32,
    height: u32,
}

/// Analysis result plus whether the demo fallback produced it
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis: RoomAnalysis,
    pub demo_fallback: bool,
}

/// HTTP client for the external room detector
pub struct RoomDetector {
    http_client: reqwest::Client,
    endpoint: Option<String>,
}

impl RoomDetector {
    /// Build a detector client; `endpoint` of None means demo-only mode
    pub fn new(endpoint: Option<String>, timeout_secs: u64) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            endpoint,
        }
    }

    /// Analyze a floor plan, falling back to the demo room set on any failure
    pub async fn analyze(
        &self,
        image_base64: Option<&str>,
        width: u32,
        height: u32,
    ) -> AnalysisOutcome {
        match self.query_detector(image_base64, width, height).await {
            Ok(mut analysis) => {
                analysis.assign_missing_ids();
                info!(rooms = analysis.rooms.len(), "Room detector analysis succeeded");
                AnalysisOutcome {
                    analysis,
                    demo_fallback: false,
                }
            }
            Err(DetectorError::Unconfigured) => {
                info!("No room detector configured, using demo analysis");
                AnalysisOutcome {
                    analysis: demo_analysis(),
                    demo_fallback: true,
                }
            }
            Err(e) => {
                warn!(error = %e, "Room detector unavailable, using demo analysis");
                AnalysisOutcome {
                    analysis: demo_analysis(),
                    demo_fallback: true,
                }
            }
        }
    }

    async fn query_detector(
        &self,
        image_base64: Option<&str>,
        width: u32,
        height: u32,
    ) -> Result<RoomAnalysis, DetectorError> {
        let endpoint = self.endpoint.as_deref().ok_or(DetectorError::Unconfigured)?;

        let response = self
            .http_client
            .post(endpoint)
            .json(&DetectorRequest {
                image_base64,
                width,
                height,
            })
            .send()
            .await
            .map_err(|e| DetectorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DetectorError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| DetectorError::Parse(e.to_string()))
    }
}

/// Fixed demo analysis: a six-room residential plan
///
/// Hand-authored reference data used whenever the detector is unavailable,
/// so the rest of the pipeline always has well-formed input to work with.
pub fn demo_analysis() -> RoomAnalysis {
    let rooms: Vec<Room> = serde_json::from_str(DEMO_ROOMS_JSON)
        .expect("demo room set is valid by construction");

    RoomAnalysis {
        summary: AnalysisSummary {
            total_rooms: rooms.len(),
            building_type: "residential".to_string(),
            total_area: "2,100 sq ft".to_string(),
        },
        rooms,
    }
}

const DEMO_ROOMS_JSON: &str = r#"[
    {
        "id": "room_1",
        "name": "Kitchen",
        "type": "kitchen",
        "boundary": [50, 50, 550, 450],
        "dimensions": "20x16 ft",
        "area": "320 sq ft",
        "objects": [
            { "type": "kitchen_island", "position": [300, 250], "dimensions": "8x4 ft" },
            { "type": "refrigerator", "position": [100, 100], "dimensions": "3x2.5 ft" },
            { "type": "stove", "position": [200, 100], "dimensions": "2.5x2 ft" },
            { "type": "sink", "position": [350, 100], "dimensions": "3x2 ft" }
        ],
        "features": [
            { "type": "window", "position": [300, 50], "width": 60 },
            { "type": "door", "position": [550, 250], "width": 36 }
        ]
    },
    {
        "id": "room_2",
        "name": "Living Room",
        "type": "living",
        "boundary": [600, 50, 1100, 500],
        "dimensions": "20x18 ft",
        "area": "360 sq ft",
        "objects": [
            { "type": "sofa", "position": [850, 300], "dimensions": "8x3 ft" },
            { "type": "coffee_table", "position": [850, 200], "dimensions": "4x2 ft" },
            { "type": "tv_stand", "position": [850, 100], "dimensions": "5x1.5 ft" },
            { "type": "armchair", "position": [700, 300], "dimensions": "3x3 ft" }
        ],
        "features": [
            { "type": "window", "position": [850, 50], "width": 100 },
            { "type": "door", "position": [600, 275], "width": 36 }
        ]
    },
    {
        "id": "room_3",
        "name": "Master Bedroom",
        "type": "bedroom",
        "boundary": [50, 500, 450, 850],
        "dimensions": "16x14 ft",
        "area": "224 sq ft",
        "objects": [
            { "type": "bed", "position": [250, 675], "dimensions": "6x7 ft" },
            { "type": "nightstand", "position": [150, 675], "dimensions": "2x2 ft" },
            { "type": "nightstand", "position": [350, 675], "dimensions": "2x2 ft" },
            { "type": "dresser", "position": [250, 800], "dimensions": "5x2 ft" }
        ],
        "features": [
            { "type": "window", "position": [250, 500], "width": 48 },
            { "type": "door", "position": [450, 675], "width": 32 }
        ]
    },
    {
        "id": "room_4",
        "name": "Bathroom",
        "type": "bathroom",
        "boundary": [500, 500, 750, 700],
        "dimensions": "10x8 ft",
        "area": "80 sq ft",
        "objects": [
            { "type": "vanity", "position": [625, 550], "dimensions": "4x2 ft" },
            { "type": "toilet", "position": [575, 650], "dimensions": "2x2.5 ft" },
            { "type": "shower", "position": [700, 625], "dimensions": "3x3 ft" }
        ],
        "features": [
            { "type": "door", "position": [500, 600], "width": 28 }
        ]
    },
    {
        "id": "room_5",
        "name": "Study",
        "type": "office",
        "boundary": [800, 600, 1100, 850],
        "dimensions": "12x10 ft",
        "area": "120 sq ft",
        "objects": [
            { "type": "desk", "position": [950, 725], "dimensions": "5x2.5 ft" },
            { "type": "office_chair", "position": [950, 750], "dimensions": "2x2 ft" },
            { "type": "bookshelf", "position": [850, 725], "dimensions": "3x1 ft" }
        ],
        "features": [
            { "type": "window", "position": [950, 600], "width": 36 },
            { "type": "door", "position": [800, 725], "width": 32 }
        ]
    },
    {
        "id": "room_6",
        "name": "Dining Room",
        "type": "dining",
        "boundary": [1150, 200, 1550, 500],
        "dimensions": "16x12 ft",
        "area": "192 sq ft",
        "objects": [
            { "type": "dining_table", "position": [1350, 350], "dimensions": "6x4 ft" },
            { "type": "dining_chair", "position": [1300, 350], "dimensions": "1.5x1.5 ft" },
            { "type": "dining_chair", "position": [1400, 350], "dimensions": "1.5x1.5 ft" },
            { "type": "cabinet", "position": [1350, 450], "dimensions": "5x2 ft" }
        ],
        "features": [
            { "type": "window", "position": [1350, 200], "width": 60 },
            { "type": "door", "position": [1150, 350], "width": 36 }
        ]
    }
]"#;
