use std::time::Duration;

use thiserror::Error;

/// Failure modes of a single yt-dlp invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The process exceeded its wall-clock limit and was killed.
    #[error("yt-dlp timed out after {}s", .limit.as_secs())]
    Timeout { limit: Duration },

    /// The process exited non-zero; the message is its stderr when non-empty.
    #[error("{message}")]
    Failed { message: String },

    /// The process exited zero but stdout was not a single JSON document.
    #[error("Invalid JSON response from yt-dlp")]
    MalformedOutput(#[source] serde_json::Error),

    /// The download finished but no output file could be located on disk.
    #[error("{detail}")]
    FileNotFound { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Builds a `Failed` error from captured stderr, falling back to a generic
    /// message when the tool printed nothing.
    pub fn failed(stderr: &str) -> Self {
        let trimmed = stderr.trim();
        let message = if trimmed.is_empty() {
            "yt-dlp exited with an error".to_string()
        } else {
            trimmed.to_string()
        };
        Self::Failed { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_uses_stderr_when_present() {
        let err = ToolError::failed("ERROR: unsupported URL\n");
        assert_eq!(err.to_string(), "ERROR: unsupported URL");
    }

    #[test]
    fn failed_falls_back_to_generic_message() {
        let err = ToolError::failed("   \n");
        assert_eq!(err.to_string(), "yt-dlp exited with an error");
    }
}
