//! # ELD Common Library
//!
//! Shared code for the ELD (Ensemble Lighting Designer) services:
//! - Event types (`EldEvent` enum) and the `EventBus`
//! - Configuration loading and resolution
//! - Common error types

pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
