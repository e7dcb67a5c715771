mod types;

pub use types::*;

use anyhow::{Context, Result};
use motionphoto_av::ExifTool;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./motionphoto.toml",
        "~/.config/motionphoto/config.toml",
        "/etc/motionphoto/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if let Some(path) = &config.tools.exiftool_path {
        if !path.exists() {
            tracing::warn!("Configured exiftool does not exist: {:?}", path);
        }
    }

    if let Some(path) = &config.tools.exiftool_config {
        if !path.exists() {
            anyhow::bail!("exiftool config file does not exist: {:?}", path);
        }
    }

    Ok(())
}

/// Build the exiftool handle described by the tools section.
pub fn exiftool(tools: &ToolsConfig) -> ExifTool {
    let exiftool = ExifTool::discover(tools.exiftool_path.as_deref());
    match &tools.exiftool_config {
        Some(config) => exiftool.with_config(config),
        None => exiftool,
    }
}
