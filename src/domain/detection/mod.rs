//! Detection domain - verdict value objects and result presentation

pub mod render;
pub mod result;

pub use render::{present, RenderModel, RECOMMEND_PROCEED, RECOMMEND_REVIEW};
pub use result::{DetectionResult, InvalidRiskLevel, ResultValidationError, RiskLevel};
