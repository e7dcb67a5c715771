use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Path to the exiftool executable (defaults to a PATH lookup)
    #[serde(default)]
    pub exiftool_path: Option<PathBuf>,

    /// User-defined tag configuration passed to exiftool with `-config`
    #[serde(default)]
    pub exiftool_config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Descend into subdirectories when pairing files
    #[serde(default)]
    pub recursive: bool,

    /// Replace existing motion photos
    #[serde(default)]
    pub overwrite: bool,
}
