use std::path::PathBuf;

use serde::Serialize;

/// A file produced by a completed download.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedFile {
    pub file_path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}
