//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the audio device and
//! the detection service API.

pub mod config;
pub mod detection;
pub mod recording;

// Re-export adapters
pub use config::XdgConfigStore;
pub use detection::HttpDetectionClient;
pub use recording::CpalRecorder;
