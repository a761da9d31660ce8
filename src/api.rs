use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    fingerprint,
    news::{self, NewsVerdict},
    payload,
    report::{AnalysisFailure, AnalysisResult},
    scorer::ImageScorer,
};

pub const BANNER: &str = "Fake News & Deepfake Detection API is running!";

// ==========================================
// 1. Shared state
// ==========================================
// Read-only: the scorer carries no mutable state, so no lock is needed.
pub struct AppState {
    pub scorer: ImageScorer,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(scorer: ImageScorer, max_body_bytes: usize) -> Self {
        Self {
            scorer,
            max_body_bytes,
        }
    }
}

// ==========================================
// 2. DTOs
// ==========================================

#[derive(Deserialize)]
pub struct UploadImageRequest {
    // "data:image/png;base64,<data>"
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct NewsRequest {
    pub text: Option<String>,
}

/// Transport-level failures, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    /// Body could not be read as JSON (too large, wrong content type, syntax).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ==========================================
// 3. Routes
// ==========================================
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .route("/", get(home))
        .route("/detect_fake_news", post(detect_fake_news))
        .route("/upload_image", post(upload_image))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ==========================================
// 4. Handlers
// ==========================================

async fn home() -> &'static str {
    BANNER
}

/// Placeholder text classifier.
async fn detect_fake_news(
    body: Result<Json<Option<NewsRequest>>, JsonRejection>,
) -> Result<Json<NewsVerdict>, ApiError> {
    let Json(req) = body?;
    let text = req
        .and_then(|req| req.text)
        .ok_or_else(|| ApiError::BadRequest("Missing text data".to_string()))?;

    info!(text_len = text.len(), "fake news check");
    Ok(Json(news::classify_text(text)))
}

/// Image upload: strip the data URI, decode base64, score off the async runtime.
async fn upload_image(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Option<UploadImageRequest>>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    // A JSON `null` body counts as "no image", like a missing field.
    let Json(req) = body?;
    let image = req
        .and_then(|req| req.image)
        .ok_or_else(|| ApiError::BadRequest("No image data received".to_string()))?;

    let encoded =
        payload::strip_data_uri(&image).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // An undecodable payload is reported like any other unreadable image.
    let bytes = match payload::decode_base64(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            info!(error = %e, "image payload rejected");
            return Ok(Json(AnalysisResult::Failed(AnalysisFailure::new(e))));
        }
    };

    // CPU-bound decode and statistics go to the blocking pool.
    let scorer = state.scorer;
    let result = tokio::task::spawn_blocking(move || {
        let digest = fingerprint::payload_digest(&bytes);
        let result = scorer.analyze(&bytes);
        info!(
            digest = %digest,
            payload_len = bytes.len(),
            is_deepfake = ?result.is_deepfake(),
            confidence = result.confidence(),
            "image analyzed"
        );
        result
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(result))
}
