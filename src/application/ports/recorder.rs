//! Recording port interface

use async_trait::async_trait;
use thiserror::Error;

/// One delivered fragment of captured audio
pub type AudioChunk = Vec<u8>;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("No audio input device available or microphone permission denied")]
    DeviceUnavailable,

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Audio capture failed: {0}")]
    CaptureFailed(String),
}

/// Port for microphone capture.
///
/// Implementations own the device stream handle. The stream must be open
/// exactly between a successful `start()` and the matching `stop()`, and
/// every hardware resource must be released by `stop()` on all exit paths,
/// including when chunk finalization itself fails.
#[async_trait]
pub trait VoiceRecorder: Send + Sync {
    /// Acquire the audio input stream and begin buffering.
    ///
    /// # Returns
    /// `RecordingError::DeviceUnavailable` if no device is present or
    /// permission is refused; the recorder stays stopped in that case.
    async fn start(&self) -> Result<(), RecordingError>;

    /// End the capture and return the buffered audio as ordered chunks.
    ///
    /// The device stream is released before any fallible finalization work,
    /// so a failed stop still closes the microphone.
    async fn stop(&self) -> Result<Vec<AudioChunk>, RecordingError>;

    /// Check if currently capturing
    fn is_recording(&self) -> bool;

    /// Get elapsed capture time in milliseconds
    fn elapsed_ms(&self) -> u64;
}
