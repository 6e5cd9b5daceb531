//! HTTP detection client adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::application::ports::{DeepfakeDetector, DetectionError};
use crate::domain::detection::{DetectionResult, RiskLevel};
use crate::domain::recording::VoiceArtifact;

/// Fixed detection path on the service
pub const DETECT_PATH: &str = "/api/detect-voice";

/// Multipart field name for the audio part
const UPLOAD_FIELD: &str = "file";

/// Fixed filename declared for the uploaded sample
const UPLOAD_FILENAME: &str = "voice.wav";

// Wire types for the detection service

/// The nested detection object inside a service response.
/// All four fields are required; anything else in the body is ignored.
#[derive(Debug, Deserialize)]
struct DetectionPayload {
    is_real: bool,
    confidence: f64,
    risk_level: String,
    prediction_score: f64,
}

#[derive(Debug, Deserialize)]
struct DetectVoiceResponse {
    detection: DetectionPayload,
}

/// Detection service client over HTTP.
///
/// Sends exactly one multipart POST per `analyze()` call: a single file part
/// with a fixed field name and filename. No retries, no auth, transport
/// default timeout.
pub struct HttpDetectionClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDetectionClient {
    /// Create a client for the given service base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Build the detection endpoint URL
    fn detect_url(&self) -> String {
        format!("{}{}", self.base_url, DETECT_PATH)
    }

    /// Validate a parsed payload into a domain result
    fn into_result(payload: DetectionPayload) -> Result<DetectionResult, DetectionError> {
        let risk_level: RiskLevel = payload
            .risk_level
            .parse()
            .map_err(|e: crate::domain::detection::InvalidRiskLevel| {
                DetectionError::InvalidResponse(e.to_string())
            })?;

        DetectionResult::new(
            payload.is_real,
            payload.confidence,
            risk_level,
            payload.prediction_score,
        )
        .map_err(|e| DetectionError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl DeepfakeDetector for HttpDetectionClient {
    async fn analyze(&self, artifact: &VoiceArtifact) -> Result<DetectionResult, DetectionError> {
        // Guard before any network activity
        if artifact.is_empty() {
            return Err(DetectionError::NoArtifact);
        }

        let part = Part::bytes(artifact.data().to_vec())
            .file_name(UPLOAD_FILENAME)
            .mime_str(artifact.mime_type().as_str())
            .map_err(|e| DetectionError::RequestFailed(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.detect_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| DetectionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DetectionError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        // Missing `detection` key or any required field fails here
        let parsed: DetectVoiceResponse = response
            .json()
            .await
            .map_err(|e| DetectionError::ParseError(e.to_string()))?;

        Self::into_result(parsed.detection)
    }
}
