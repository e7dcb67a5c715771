//! # motionphoto-av
//!
//! External collaborators for motion photo creation.
//!
//! This crate provides functionality for:
//! - Writing metadata tags through `exiftool`
//! - Reading motion photo tags back for inspection
//! - Detecting the external tools that are installed
//! - Classifying input files as image, video or neither
//!
//! The [`MetadataWriter`] trait is the seam between the motion photo assembler
//! and the tool that embeds tags, so callers can substitute their own writer.
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support

mod error;

pub mod classify;
pub mod exiftool;
pub mod tags;
pub mod tools;

// Re-exports
pub use classify::{classify, is_jpeg, FileKind, ImageFormat};
pub use error::{Error, Result};
pub use exiftool::ExifTool;
pub use tags::{MetadataTag, MetadataWriter};
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
