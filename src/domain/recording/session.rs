//! Recording session state machine

use std::fmt;
use thiserror::Error;

use super::artifact::{AudioMimeType, VoiceArtifact};

/// Recording session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Captured,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Captured => "captured",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Recording session entity.
/// Owns the in-progress chunk buffer and the finished artifact.
///
/// State machine:
///   IDLE -> RECORDING (start_recording)
///   RECORDING -> CAPTURED (stop_recording, assembles the artifact)
///   CAPTURED -> RECORDING (start_recording, discards the prior artifact)
///
/// There is no path back to IDLE; a new recording supersedes the old one.
/// Chunks append only while RECORDING and the artifact exists only while
/// CAPTURED.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
    chunks: Vec<Vec<u8>>,
    artifact: Option<VoiceArtifact>,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            chunks: Vec::new(),
            artifact: None,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Check if an artifact has been captured
    pub fn is_captured(&self) -> bool {
        self.state == SessionState::Captured
    }

    /// Number of chunks buffered so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The finished artifact, present only while CAPTURED
    pub fn artifact(&self) -> Option<&VoiceArtifact> {
        self.artifact.as_ref()
    }

    /// Transition into RECORDING, from IDLE or CAPTURED.
    /// Any prior chunks and artifact are discarded.
    pub fn start_recording(&mut self) -> Result<(), InvalidTransition> {
        if self.state == SessionState::Recording {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "start recording".to_string(),
            });
        }
        self.chunks.clear();
        self.artifact = None;
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Append one delivered audio fragment. Only legal while RECORDING.
    pub fn append_chunk(&mut self, chunk: Vec<u8>) -> Result<(), InvalidTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "append audio chunk".to_string(),
            });
        }
        self.chunks.push(chunk);
        Ok(())
    }

    /// Transition from RECORDING to CAPTURED, assembling all buffered chunks
    /// into a single artifact in arrival order.
    pub fn stop_recording(
        &mut self,
        mime_type: AudioMimeType,
    ) -> Result<&VoiceArtifact, InvalidTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "stop recording".to_string(),
            });
        }

        let total: usize = self.chunks.iter().map(Vec::len).sum();
        let mut data = Vec::with_capacity(total);
        for chunk in self.chunks.drain(..) {
            data.extend_from_slice(&chunk);
        }

        self.state = SessionState::Captured;
        Ok(self.artifact.insert(VoiceArtifact::new(data, mime_type)))
    }
}
