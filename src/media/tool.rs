use async_trait::async_trait;
use serde_json::Value;

use super::{error::ToolError, types::DownloadedFile};

#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Human-readable name of the backing tool
    fn name(&self) -> &'static str;

    /// Version string of the installed tool
    async fn version(&self) -> Result<String, ToolError>;

    /// Metadata document for a URL, without downloading anything
    async fn metadata(&self, url: &str) -> Result<Value, ToolError>;

    /// Download the media behind a URL and return the produced file
    async fn download(&self, url: &str, item_index: u32) -> Result<DownloadedFile, ToolError>;
}
