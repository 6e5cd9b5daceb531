//! Recording domain - session state machine and captured audio

pub mod artifact;
pub mod duration;
pub mod session;

pub use artifact::{AudioMimeType, VoiceArtifact};
pub use duration::Duration;
pub use session::{InvalidTransition, RecordingSession, SessionState};
