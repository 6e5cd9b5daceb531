//! Result presentation
//!
//! Pure mapping from a validated [`DetectionResult`] to a render model.
//! All display decisions - labels, style classes, percent formatting, the
//! recommendation copy - live here so the terminal layer stays a dumb
//! renderer.

use super::result::DetectionResult;

/// Recommendation shown for an authentic voice
pub const RECOMMEND_PROCEED: &str =
    "Voice verified as authentic. Safe to proceed with transaction.";

/// Recommendation shown when a deepfake is suspected
pub const RECOMMEND_REVIEW: &str =
    "Potential deepfake detected. Enable additional 2FA or manual review.";

/// Deterministic, display-ready view of a detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    /// Headline verdict, e.g. "REAL VOICE"
    pub verdict_label: &'static str,
    /// Style class for the verdict: "authentic" or "deepfake"
    pub verdict_class: &'static str,
    /// Normalized risk tier label, e.g. "LOW"
    pub risk_label: &'static str,
    /// Lowercase style class for the risk tier
    pub risk_class: &'static str,
    /// Confidence as a percentage with one decimal, e.g. "92.0%"
    pub confidence_label: String,
    /// Raw prediction score as a percentage with two decimals, e.g. "8.00%"
    pub score_label: String,
    /// One of the two fixed recommendation strings, keyed by the verdict
    pub recommendation: &'static str,
}

/// Map a detection result to its render model.
///
/// Pure and stateless: the same result always yields an identical model.
pub fn present(result: &DetectionResult) -> RenderModel {
    let (verdict_label, verdict_class, recommendation) = if result.is_real() {
        ("REAL VOICE", "authentic", RECOMMEND_PROCEED)
    } else {
        ("DEEPFAKE DETECTED", "deepfake", RECOMMEND_REVIEW)
    };

    RenderModel {
        verdict_label,
        verdict_class,
        risk_label: result.risk_level().as_str(),
        risk_class: result.risk_level().style_class(),
        confidence_label: format!("{:.1}%", result.confidence() * 100.0),
        score_label: format!("{:.2}%", result.prediction_score() * 100.0),
        recommendation,
    }
}
