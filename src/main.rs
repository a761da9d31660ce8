use deepfake_heuristic::{api, config::Config, init_tracing, scorer::ImageScorer};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ----------------------------------------------------------------
    // 0. Logging & config
    // ----------------------------------------------------------------
    init_tracing()?;
    let config = Config::from_env()?;
    info!(
        host = %config.host,
        port = config.port,
        max_body_bytes = config.max_body_bytes,
        thresholds = ?config.thresholds,
        "configuration loaded"
    );

    // ----------------------------------------------------------------
    // 1. Shared state
    // ----------------------------------------------------------------
    let shared_state = Arc::new(api::AppState::new(
        ImageScorer::new(config.thresholds),
        config.max_body_bytes,
    ));

    // ----------------------------------------------------------------
    // 2. HTTP service
    // ----------------------------------------------------------------
    let app = api::app(shared_state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("API listening on http://{}", addr);
    info!("  GET  /                 : health banner");
    info!("  POST /upload_image     : score a base64 data-URI image");
    info!("  POST /detect_fake_news : placeholder text classifier");

    axum::serve(listener, app).await?;

    Ok(())
}
