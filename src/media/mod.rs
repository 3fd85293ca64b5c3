mod error;
mod process;
mod tool;
mod types;
mod utils;
mod ytdlp;

pub use error::ToolError;
pub use tool::MediaTool;
pub use types::DownloadedFile;
pub use ytdlp::YtDlp;
