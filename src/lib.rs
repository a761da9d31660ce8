//! # deepfake-heuristic
//!
//! A deterministic heuristic that guesses whether an image is synthetic or
//! manipulated from three pixel statistics, plus the small HTTP service that
//! exposes it.
//!
//! - `pixels`, `indexed`, `metrics`, `scorer`, `report` - the scoring core (pure, no I/O)
//! - `payload`, `fingerprint` - turning upload payloads into bytes and log keys
//! - `news` - placeholder text classifier
//! - `api`, `config` - the axum service around it

pub mod api;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod indexed;
pub mod metrics;
pub mod news;
pub mod payload;
pub mod pixels;
pub mod report;
pub mod scorer;

pub use error::{AnalysisError, PayloadError};
pub use report::AnalysisResult;
pub use scorer::{analyze_image, ImageScorer, Thresholds};

/// Installs the global tracing subscriber (`RUST_LOG`, default `info`).
///
/// Called once by the binary entry point.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
