//! Detection result value objects

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error when the service reports a risk tier outside the known set
#[derive(Debug, Clone, Error)]
#[error("Unknown risk level: \"{input}\". Expected one of: LOW, MEDIUM, HIGH, CRITICAL")]
pub struct InvalidRiskLevel {
    pub input: String,
}

/// Categorical severity tier accompanying a verdict.
/// Case-insensitive at the wire boundary, normalized to uppercase internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Canonical uppercase label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Lowercase style class for presentation
    pub const fn style_class(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = InvalidRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(InvalidRiskLevel {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when a detection result fails its numeric invariants
#[derive(Debug, Clone, Error)]
pub enum ResultValidationError {
    #[error("Confidence {0} is outside [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),

    #[error("Prediction score {0} is outside [0.0, 1.0]")]
    PredictionScoreOutOfRange(f64),
}

/// Validated verdict from the detection service.
/// Constructed only from a schema-valid response; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    is_real: bool,
    confidence: f64,
    risk_level: RiskLevel,
    prediction_score: f64,
}

impl DetectionResult {
    /// Create a result, enforcing the [0.0, 1.0] range on both scores.
    pub fn new(
        is_real: bool,
        confidence: f64,
        risk_level: RiskLevel,
        prediction_score: f64,
    ) -> Result<Self, ResultValidationError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ResultValidationError::ConfidenceOutOfRange(confidence));
        }
        if !(0.0..=1.0).contains(&prediction_score) {
            return Err(ResultValidationError::PredictionScoreOutOfRange(
                prediction_score,
            ));
        }

        Ok(Self {
            is_real,
            confidence,
            risk_level,
            prediction_score,
        })
    }

    /// Binary authentic/synthetic verdict
    pub fn is_real(&self) -> bool {
        self.is_real
    }

    /// The service's self-reported certainty, in [0.0, 1.0]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Normalized severity tier
    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// The model's raw score, distinct from confidence, in [0.0, 1.0]
    pub fn prediction_score(&self) -> f64 {
        self.prediction_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parses_uppercase() {
        assert_eq!("LOW".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("CRITICAL".parse::<RiskLevel>().unwrap(), RiskLevel::Critical);
    }

    #[test]
    fn risk_level_parse_is_case_insensitive() {
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("Medium".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert_eq!("hIgH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
    }

    #[test]
    fn risk_level_unknown_tier_fails() {
        let err = "EXTREME".parse::<RiskLevel>().unwrap_err();
        assert!(err.to_string().contains("EXTREME"));
    }

    #[test]
    fn risk_level_display_is_normalized() {
        assert_eq!("high".parse::<RiskLevel>().unwrap().to_string(), "HIGH");
    }

    #[test]
    fn risk_level_style_class() {
        assert_eq!(RiskLevel::Low.style_class(), "low");
        assert_eq!(RiskLevel::Critical.style_class(), "critical");
    }

    #[test]
    fn result_accepts_valid_ranges() {
        let result = DetectionResult::new(true, 0.92, RiskLevel::Low, 0.08).unwrap();
        assert!(result.is_real());
        assert_eq!(result.confidence(), 0.92);
        assert_eq!(result.risk_level(), RiskLevel::Low);
        assert_eq!(result.prediction_score(), 0.08);
    }

    #[test]
    fn result_accepts_boundary_values() {
        assert!(DetectionResult::new(true, 0.0, RiskLevel::Low, 0.0).is_ok());
        assert!(DetectionResult::new(false, 1.0, RiskLevel::Critical, 1.0).is_ok());
    }

    #[test]
    fn confidence_above_one_fails() {
        let err = DetectionResult::new(true, 1.5, RiskLevel::Low, 0.5).unwrap_err();
        assert!(matches!(err, ResultValidationError::ConfidenceOutOfRange(_)));
    }

    #[test]
    fn negative_confidence_fails() {
        let err = DetectionResult::new(true, -0.1, RiskLevel::Low, 0.5).unwrap_err();
        assert!(matches!(err, ResultValidationError::ConfidenceOutOfRange(_)));
    }

    #[test]
    fn prediction_score_out_of_range_fails() {
        let err = DetectionResult::new(false, 0.5, RiskLevel::High, 2.0).unwrap_err();
        assert!(matches!(
            err,
            ResultValidationError::PredictionScoreOutOfRange(_)
        ));
    }

    #[test]
    fn nan_confidence_fails() {
        assert!(DetectionResult::new(true, f64::NAN, RiskLevel::Low, 0.5).is_err());
    }
}
