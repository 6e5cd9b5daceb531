//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod detection;
pub mod error;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use detection::{present, DetectionResult, RenderModel, RiskLevel};
pub use error::*;
pub use recording::{AudioMimeType, Duration, RecordingSession, SessionState, VoiceArtifact};
