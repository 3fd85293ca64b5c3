use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    error::ToolError, process::run_with_timeout, tool::MediaTool, types::DownloadedFile, utils,
};

const YTDLP_BIN: &str = "yt-dlp";

const VERSION_TIMEOUT: Duration = Duration::from_secs(5);
const METADATA_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

pub struct YtDlp {
    download_dir: PathBuf,
}

impl YtDlp {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    fn download_args(output_template: &str, url: &str, item_index: u32) -> Vec<String> {
        let mut args = vec![
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            "-o".to_string(),
            output_template.to_string(),
        ];

        // yt-dlp numbers playlist entries from 1, the API from 0.
        if item_index > 0 {
            args.push("--playlist-items".to_string());
            args.push((item_index + 1).to_string());
        }

        args.push(url.to_string());
        args
    }

    pub async fn test_availability(&self) -> bool {
        match self.version().await {
            Ok(version) => {
                info!("✅ yt-dlp is available, version: {}", version);
                true
            }
            Err(e) => {
                warn!("❌ yt-dlp not available: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl MediaTool for YtDlp {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn version(&self) -> Result<String, ToolError> {
        let output =
            run_with_timeout(YTDLP_BIN, &["--version".to_string()], VERSION_TIMEOUT).await?;
        if !output.success() {
            return Err(ToolError::failed(&output.stderr));
        }
        Ok(output.stdout.trim().to_string())
    }

    async fn metadata(&self, url: &str) -> Result<Value, ToolError> {
        debug!("Extracting metadata for: {}", url);

        let args = vec![
            "--dump-json".to_string(),
            "--no-warnings".to_string(),
            "--no-check-certificates".to_string(),
            url.to_string(),
        ];
        let output = run_with_timeout(YTDLP_BIN, &args, METADATA_TIMEOUT).await?;
        if !output.success() {
            return Err(ToolError::failed(&output.stderr));
        }

        serde_json::from_str(&output.stdout).map_err(ToolError::MalformedOutput)
    }

    async fn download(&self, url: &str, item_index: u32) -> Result<DownloadedFile, ToolError> {
        // Each download gets a private subdirectory so concurrent requests
        // can never be handed each other's files.
        let request_dir = tempfile::Builder::new()
            .prefix("dl-")
            .tempdir_in(&self.download_dir)?
            .keep();

        let template = request_dir.join("%(title)s-%(id)s.%(ext)s");
        let args = Self::download_args(&template.to_string_lossy(), url, item_index);

        info!("Downloading {} (item {})", url, item_index);
        let output = run_with_timeout(YTDLP_BIN, &args, DOWNLOAD_TIMEOUT).await?;
        if !output.success() {
            return Err(ToolError::failed(&output.stderr));
        }

        let path = match utils::parse_reported_path(&output.stdout) {
            Some(path) => path,
            None => {
                debug!(
                    "No destination line in yt-dlp output, scanning {}",
                    request_dir.display()
                );
                utils::newest_file_in(&request_dir)?.ok_or_else(|| ToolError::FileNotFound {
                    detail: "Could not determine downloaded file path".to_string(),
                })?
            }
        };

        let metadata =
            tokio::fs::metadata(&path)
                .await
                .map_err(|_| ToolError::FileNotFound {
                    detail: format!("Downloaded file not found: {}", path.display()),
                })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(DownloadedFile {
            file_path: path,
            file_name,
            size_bytes: metadata.len(),
        })
    }
}
