//! Error types for the scorer and the payload glue around it.
//!
//! The scorer never hands these to its callers: every [`AnalysisError`] is
//! folded into a failure [`AnalysisResult`](crate::report::AnalysisResult)
//! carrying only the rendered message.

use thiserror::Error;

/// Everything that can go wrong between receiving bytes and producing metrics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The bytes are not a well-formed image in a supported encoding.
    #[error("cannot identify image data: {0}")]
    Decode(String),

    /// The decoded pixel array cannot be reduced to metrics (empty, too few rows).
    #[error("{0}")]
    Compute(String),
}

/// Errors raised while unwrapping a transport payload into image bytes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("image payload is not a data URI: expected '<prefix>,<base64 data>'")]
    MissingPrefix,

    #[error("invalid base64 image payload: {0}")]
    InvalidBase64(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_keeps_reason() {
        let error = AnalysisError::Decode("The image format could not be determined".to_string());
        let message = error.to_string();
        assert!(message.starts_with("cannot identify image data"));
        assert!(message.contains("could not be determined"));
    }

    #[test]
    fn compute_error_is_the_bare_reason() {
        let error = AnalysisError::Compute("pixel array is empty".to_string());
        assert_eq!(error.to_string(), "pixel array is empty");
    }

    #[test]
    fn payload_error_mentions_expected_shape() {
        assert!(PayloadError::MissingPrefix.to_string().contains("<prefix>,"));
    }
}
