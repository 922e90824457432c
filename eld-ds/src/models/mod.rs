//! Domain models for the design synthesis service

pub mod design;
pub mod room;
pub mod session;

pub use design::{Design, Fixture, LightingMetrics, ReasoningEntry};
pub use room::{
    parse_leading_float, AnalysisSummary, Room, RoomAnalysis, RoomFeature, RoomObject, RoomType,
};
pub use session::DesignSession;
