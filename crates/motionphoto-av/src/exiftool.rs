//! Metadata writing through the `exiftool` command line tool.

use crate::tags::{MetadataTag, MetadataWriter};
use crate::tools::{get_tool_path, EXIFTOOL};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Handle to an `exiftool` executable.
///
/// # Example
///
/// ```no_run
/// use motionphoto_av::{ExifTool, MetadataTag, MetadataWriter};
/// use std::path::Path;
///
/// let exiftool = ExifTool::discover(None);
/// exiftool.write_tags(Path::new("MV_photo.jpg"), &[MetadataTag::new("MicroVideo", 1)])?;
/// # Ok::<(), motionphoto_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
    config: Option<PathBuf>,
}

impl ExifTool {
    /// Use the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            config: None,
        }
    }

    /// Locate exiftool, preferring a configured path over `PATH`.
    ///
    /// Falls back to the bare program name when nothing is found, so a missing
    /// tool surfaces as [`Error::ToolNotFound`] on first use rather than here.
    pub fn discover(config_path: Option<&Path>) -> Self {
        let program =
            get_tool_path(EXIFTOOL, config_path).unwrap_or_else(|_| PathBuf::from(EXIFTOOL));
        Self::new(program)
    }

    /// Pass a user-defined tag configuration file via `-config`.
    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Path of the executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Read the named tags from `media` as JSON values.
    ///
    /// Tags that are absent from the file are absent from the returned map.
    pub fn read_tags(&self, media: &Path, names: &[&str]) -> Result<Map<String, Value>> {
        if !media.exists() {
            return Err(Error::file_not_found(media));
        }

        let mut args = self.base_args();
        args.push("-j".to_string());
        args.extend(names.iter().map(|name| format!("-{name}")));
        args.push(media.to_string_lossy().to_string());

        let output = self.run(&args)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let entries: Vec<Map<String, Value>> = serde_json::from_str(&stdout)?;

        entries
            .into_iter()
            .next()
            .ok_or_else(|| Error::parse_error(EXIFTOOL, "no entries in JSON output"))
    }

    fn base_args(&self) -> Vec<String> {
        match &self.config {
            Some(config) => vec!["-config".to_string(), config.to_string_lossy().to_string()],
            None => Vec::new(),
        }
    }

    fn run(&self, args: &[String]) -> Result<Output> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Running {} {}", self.program.display(), args.join(" "));

        let output = Command::new(&self.program).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(self.program.to_string_lossy())
            } else {
                Error::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed(
                EXIFTOOL,
                format!(
                    "command '{} {}' failed with error: '{}'",
                    self.program.display(),
                    args.join(" "),
                    stderr.trim_end()
                ),
            ));
        }

        Ok(output)
    }
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new(EXIFTOOL)
    }
}

impl MetadataWriter for ExifTool {
    fn write_tags(&self, media: &Path, tags: &[MetadataTag]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let mut args = self.base_args();
        args.push("-overwrite_original".to_string());
        args.push("-ignoreMinorErrors".to_string());
        args.extend(tags.iter().map(MetadataTag::to_arg));
        args.push(media.to_string_lossy().to_string());

        self.run(&args)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Wrote {} tags to {}", tags.len(), media.display());

        Ok(())
    }
}
