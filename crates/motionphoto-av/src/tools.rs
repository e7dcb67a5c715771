//! External tool detection.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the metadata tool on `PATH`.
pub const EXIFTOOL: &str = "exiftool";

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// # Example
///
/// ```no_run
/// use motionphoto_av::check_tool;
///
/// let info = check_tool("exiftool", "-ver");
/// if info.available {
///     println!("exiftool version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str, version_arg: &str) -> ToolInfo {
    check_tool_at(name, Path::new(name), version_arg)
}

/// Check a tool at an explicit program path.
pub fn check_tool_at(name: &str, program: &Path, version_arg: &str) -> ToolInfo {
    let result = Command::new(program).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.trim().to_string());

            let path = if program.components().count() > 1 {
                Some(program.to_path_buf())
            } else {
                which::which(program).ok()
            };

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check every tool motion photo creation relies on.
pub fn check_tools(exiftool_path: Option<&Path>) -> Vec<ToolInfo> {
    let program =
        get_tool_path(EXIFTOOL, exiftool_path).unwrap_or_else(|_| PathBuf::from(EXIFTOOL));
    vec![check_tool_at(EXIFTOOL, &program, "-ver")]
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    require_tool(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tool_not_found() {
        let info = check_tool("nonexistent_tool_12345", "--version");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn test_require_tool_not_found() {
        let err = require_tool("nonexistent_tool_12345").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "nonexistent_tool_12345 is not installed or not on PATH"
        );
    }

    #[test]
    fn test_get_tool_path_prefers_config() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = get_tool_path("nonexistent_tool_12345", Some(file.path())).unwrap();
        assert_eq!(path, file.path());
    }

    #[test]
    fn test_get_tool_path_missing_config_falls_back() {
        let result = get_tool_path(
            "nonexistent_tool_12345",
            Some(Path::new("/nonexistent/bin/tool")),
        );
        assert!(result.is_err());
    }
}
