//! # motionphoto
//!
//! Create motion photos playable by both Samsung and Google Gallery viewers
//! from a still JPEG image and a video clip.
//!
//! The output file is the image followed by a Samsung SEF trailer embedding
//! the video (see [`motionphoto_sef`]). Metadata tags for both vendors are
//! then written into the image through a [`MetadataWriter`], normally
//! [`ExifTool`].
//!
//! # Modules
//!
//! - `motion` - Motion photo assembly (seed, append trailer, write tags)
//! - `samsung` / `google` - Vendor metadata tag sets
//! - `batch` - Pairing images and videos in a directory
//! - `config` - TOML configuration

pub mod batch;
pub mod config;
mod error;
pub mod google;
pub mod motion;
pub mod samsung;

pub use error::{Error, Result};
pub use motion::{create_motion_photo, MotionAssembler, MotionOptions, MotionPhoto};
pub use motionphoto_av::{ExifTool, MetadataTag, MetadataWriter};
pub use motionphoto_sef::Trailer;
