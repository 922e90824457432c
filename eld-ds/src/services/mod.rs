//! Engine services: synthesis, metrics, intent, mutation, detector client

pub mod intent;
pub mod metrics;
pub mod mutation;
pub mod room_detector;
pub mod rules;
pub mod synthesizer;
