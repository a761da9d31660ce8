//! Statistical descriptors derived from a [`PixelArray`].
//!
//! All three statistics treat the array as one flat population, so an RGB
//! image contributes its red, green and blue samples side by side.

use crate::error::AnalysisError;
use crate::pixels::PixelArray;

/// The three scalars the threshold rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSet {
    /// Population standard deviation of every sample.
    pub noise_level: f64,
    /// Arithmetic mean of every sample.
    pub avg_brightness: f64,
    /// Population standard deviation of the row-axis gradient.
    pub edge_density: f64,
}

impl MetricSet {
    pub fn compute(pixels: &PixelArray) -> Result<Self, AnalysisError> {
        if pixels.is_empty() {
            return Err(AnalysisError::Compute("pixel array is empty".to_string()));
        }

        let (avg_brightness, noise_level) = mean_and_std(pixels.samples());
        let gradient = row_gradient(pixels)?;
        let (_, edge_density) = mean_and_std(&gradient);

        Ok(Self {
            noise_level,
            avg_brightness,
            edge_density,
        })
    }
}

/// Mean and population standard deviation, two-pass.
///
/// Returns `(0.0, 0.0)` for an empty slice; callers reject empty arrays first.
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;

    (mean, variance.sqrt())
}

/// Discrete gradient along the first (row) axis.
///
/// Interior rows use the central difference `(next - prev) / 2`; the first
/// and last rows use a one-sided first difference. The output has the same
/// shape as the input.
pub fn row_gradient(pixels: &PixelArray) -> Result<Vec<f64>, AnalysisError> {
    let height = pixels.height();
    if height < 2 {
        return Err(AnalysisError::Compute(format!(
            "need at least 2 rows to take a gradient, got {height}"
        )));
    }
    if pixels.is_empty() {
        return Err(AnalysisError::Compute("pixel array is empty".to_string()));
    }

    let rows: Vec<&[f64]> = pixels.samples().chunks_exact(pixels.row_len()).collect();
    let mut gradient = Vec::with_capacity(pixels.samples().len());

    for i in 0..height {
        let (prev, next, span) = if i == 0 {
            (0, 1, 1.0)
        } else if i == height - 1 {
            (i - 1, i, 1.0)
        } else {
            (i - 1, i + 1, 2.0)
        };
        gradient.extend(
            rows[next]
                .iter()
                .zip(rows[prev])
                .map(|(n, p)| (n - p) / span),
        );
    }

    Ok(gradient)
}
