mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::Semaphore};
use tracing::{info, warn};

use crate::{
    config::Config,
    media::{MediaTool, YtDlp},
};

pub const SERVICE_NAME: &str = "fetchd";

#[derive(Clone)]
pub struct AppState {
    pub tool: Arc<dyn MediaTool>,
    pub download_slots: Arc<Semaphore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/version", get(routes::version))
        .route("/metadata", post(routes::metadata))
        .route("/download", post(routes::download))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let tool = YtDlp::new(config.download_dir.clone());
    if !tool.test_availability().await {
        warn!("yt-dlp is not on PATH; /metadata and /download will fail until it is installed");
    }

    let state = AppState {
        tool: Arc::new(tool),
        download_slots: Arc::new(Semaphore::new(config.max_concurrent_downloads)),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(state).into_make_service())
        .await
        .context("HTTP server error")?;

    Ok(())
}
