//! Errors raised while inspecting media files or driving exiftool.

use std::path::PathBuf;

/// Result alias for metadata and classification operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a metadata read/write or of a file inspection.
///
/// `ToolFailed` carries the tool's own stderr so callers can show exactly
/// what exiftool rejected.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The executable could not be located or spawned.
    #[error("{tool} is not installed or not on PATH")]
    ToolNotFound { tool: String },

    /// The tool ran and exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    /// The tool succeeded but printed something unexpected.
    #[error("unexpected {tool} output: {message}")]
    ParseError { tool: String, message: String },

    /// A media file to inspect or tag is missing.
    #[error("media file does not exist: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `exiftool -j` produced invalid JSON.
    #[error("invalid exiftool JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
