//! Detection port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::detection::DetectionResult;
use crate::domain::recording::VoiceArtifact;

/// Detection errors
#[derive(Debug, Clone, Error)]
pub enum DetectionError {
    #[error("No recorded audio to analyze")]
    NoArtifact,

    #[error("Detection request failed: {0}")]
    RequestFailed(String),

    #[error("Detection service returned HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Failed to parse detection response: {0}")]
    ParseError(String),

    #[error("Invalid detection response: {0}")]
    InvalidResponse(String),
}

/// Port for voice deepfake analysis.
///
/// One call is one independent attempt: no retry, no caching, no partial
/// results. A call either yields a fully validated [`DetectionResult`] or a
/// typed error.
#[async_trait]
pub trait DeepfakeDetector: Send + Sync {
    /// Analyze a captured voice artifact.
    ///
    /// # Returns
    /// `DetectionError::NoArtifact` if the artifact is empty; this is checked
    /// before any network activity.
    async fn analyze(&self, artifact: &VoiceArtifact) -> Result<DetectionResult, DetectionError>;
}
