use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::{AppState, SERVICE_NAME};
use crate::media::ToolError;

#[derive(Debug, Deserialize)]
pub struct MetadataBody {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadBody {
    url: Option<String>,
    #[serde(default, rename = "itemIndex")]
    item_index: u32,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn require_url(url: Option<String>) -> Result<String, Response> {
    match url {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(error_response(StatusCode::BAD_REQUEST, "URL is required")),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

pub async fn version(State(state): State<AppState>) -> Response {
    match state.tool.version().await {
        Ok(version) => {
            Json(json!({ "version": version, "service": SERVICE_NAME })).into_response()
        }
        Err(e) => {
            warn!("{} version check failed: {}", state.tool.name(), e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub async fn metadata(State(state): State<AppState>, Json(body): Json<MetadataBody>) -> Response {
    let url = match require_url(body.url) {
        Ok(url) => url,
        Err(response) => return response,
    };

    match state.tool.metadata(&url).await {
        Ok(document) => Json(document).into_response(),
        Err(ToolError::Timeout { .. }) => {
            warn!("Timeout getting metadata for {}", url);
            error_response(StatusCode::REQUEST_TIMEOUT, "Request timeout")
        }
        Err(e) => {
            warn!("{} error for {}: {}", state.tool.name(), url, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub async fn download(State(state): State<AppState>, Json(body): Json<DownloadBody>) -> Response {
    let url = match require_url(body.url) {
        Ok(url) => url,
        Err(response) => return response,
    };

    // Bounds the number of simultaneous yt-dlp invocations; requests over the
    // limit wait here for a free slot.
    let _slot = match state.download_slots.clone().acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Service unavailable"),
    };

    match state.tool.download(&url, body.item_index).await {
        Ok(file) => Json(file).into_response(),
        Err(ToolError::Timeout { .. }) => {
            warn!("Timeout downloading {}", url);
            error_response(StatusCode::REQUEST_TIMEOUT, "Download timeout (max 5 minutes)")
        }
        Err(e) => {
            warn!("Download failed for {}: {}", url, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
