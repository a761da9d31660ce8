//! Image authenticity scorer (真伪评分器)
//!
//! **职责**: bytes in, [`AnalysisResult`] out. Decode, reduce to a
//! [`MetricSet`], run three independent threshold rules, and map the number
//! of rules that fired to a verdict and a confidence value.
//!
//! **失败语义**: any decode or compute error is caught here and becomes the
//! failure variant. Callers never see an `Err`; the only diagnostic they get
//! is the message string.
//!
//! The rules are a fixed heuristic with no empirical calibration behind them.

use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::metrics::MetricSet;
use crate::pixels::PixelArray;
use crate::report::{round2, AnalysisDetails, AnalysisFailure, AnalysisReport, AnalysisResult};

pub const SUCCESS_MESSAGE: &str = "Image analyzed successfully";

/// Tunable constants of the heuristic. `Default` gives the stock values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// `noise_level` strictly above this fires the high-noise rule.
    pub noise_threshold: f64,
    /// `edge_density` strictly below this fires the low-edge-density rule.
    pub edge_threshold: f64,
    pub brightness_center: f64,
    /// Distance from `brightness_center` strictly above this fires the brightness rule.
    pub brightness_tolerance: f64,
    pub base_confidence: f64,
    /// Added to the confidence once per fired rule.
    pub confidence_step: f64,
    /// Minimum number of fired rules for a positive verdict.
    pub deepfake_marker_count: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            noise_threshold: 50.0,
            edge_threshold: 10.0,
            brightness_center: 128.0,
            brightness_tolerance: 50.0,
            base_confidence: 0.5,
            confidence_step: 0.1,
            deepfake_marker_count: 2,
        }
    }
}

impl Thresholds {
    pub fn evaluate(&self, metrics: &MetricSet) -> Markers {
        Markers {
            high_noise: metrics.noise_level > self.noise_threshold,
            low_edge_density: metrics.edge_density < self.edge_threshold,
            abnormal_brightness: (metrics.avg_brightness - self.brightness_center).abs()
                > self.brightness_tolerance,
        }
    }
}

/// Which rules fired for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Markers {
    pub high_noise: bool,
    pub low_edge_density: bool,
    pub abnormal_brightness: bool,
}

impl Markers {
    pub fn count(&self) -> u8 {
        [self.high_noise, self.low_edge_density, self.abnormal_brightness]
            .into_iter()
            .filter(|&fired| fired)
            .count() as u8
    }
}

/// Stateless scorer; cheap to copy into worker threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageScorer {
    thresholds: Thresholds,
}

impl ImageScorer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Full pipeline: `Start → Decoded → Scored → Done`, or `Start → Failed → Done`.
    pub fn analyze(&self, bytes: &[u8]) -> AnalysisResult {
        match self.try_analyze(bytes) {
            Ok(report) => AnalysisResult::Analyzed(report),
            Err(error) => {
                warn!(error = %error, payload_len = bytes.len(), "image analysis failed");
                AnalysisResult::Failed(AnalysisFailure::from(error))
            }
        }
    }

    fn try_analyze(&self, bytes: &[u8]) -> Result<AnalysisReport, AnalysisError> {
        let pixels = PixelArray::decode(bytes)?;
        let metrics = MetricSet::compute(&pixels)?;
        debug!(
            height = pixels.height(),
            width = pixels.width(),
            channels = pixels.channels(),
            noise_level = metrics.noise_level,
            avg_brightness = metrics.avg_brightness,
            edge_density = metrics.edge_density,
            "metrics computed"
        );
        Ok(self.score(&metrics))
    }

    /// Applies the threshold rules to already computed metrics.
    pub fn score(&self, metrics: &MetricSet) -> AnalysisReport {
        let markers = self.thresholds.evaluate(metrics);
        let suspicious_markers = markers.count();

        let mut confidence = self.thresholds.base_confidence;
        for _ in 0..suspicious_markers {
            confidence += self.thresholds.confidence_step;
        }

        AnalysisReport {
            is_deepfake: suspicious_markers >= self.thresholds.deepfake_marker_count,
            confidence: round2(confidence),
            message: SUCCESS_MESSAGE.to_string(),
            details: AnalysisDetails {
                noise_level: round2(metrics.noise_level),
                brightness: round2(metrics.avg_brightness),
                edge_density: round2(metrics.edge_density),
                suspicious_markers,
            },
        }
    }
}

/// Analyzes with the stock thresholds.
pub fn analyze_image(bytes: &[u8]) -> AnalysisResult {
    ImageScorer::default().analyze(bytes)
}
