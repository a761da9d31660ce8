use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Outcome of one analysis, exactly as it goes over the wire.
///
/// The two variants serialize to different shapes (`untagged`): a success
/// carries `message` and `details`, a failure carries `error` with a null
/// verdict and zero confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Analyzed(AnalysisReport),
    Failed(AnalysisFailure),
}

impl AnalysisResult {
    pub fn is_deepfake(&self) -> Option<bool> {
        match self {
            Self::Analyzed(report) => Some(report.is_deepfake),
            Self::Failed(failure) => failure.is_deepfake,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Analyzed(report) => report.confidence,
            Self::Failed(failure) => failure.confidence,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub is_deepfake: bool,
    pub confidence: f64,
    pub message: String,
    pub details: AnalysisDetails,
}

/// Rounded metrics plus the number of rules that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub noise_level: f64,
    pub brightness: f64,
    pub edge_density: f64,
    pub suspicious_markers: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub error: String,
    /// Always `None`; kept so the field serializes as `null`.
    pub is_deepfake: Option<bool>,
    pub confidence: f64,
}

impl AnalysisFailure {
    pub fn new(reason: impl std::fmt::Display) -> Self {
        Self {
            error: format!("Image analysis failed: {reason}"),
            is_deepfake: None,
            confidence: 0.0,
        }
    }
}

impl From<AnalysisError> for AnalysisFailure {
    fn from(error: AnalysisError) -> Self {
        Self::new(error)
    }
}

/// Rounds to two decimal places for reporting; exact ties go to the even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
