//! Error types for motionphoto-sef.

use std::io;
use thiserror::Error;

/// Result type for motionphoto-sef operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for motionphoto-sef operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The video payload exceeds what the offset fields can address.
    #[error("Input video file size cannot exceed {limit} bytes (got {size})")]
    VideoTooLarge { size: u64, limit: u64 },

    /// A record offset no longer fits in a 32-bit field.
    #[error("SEF trailer too large: offset {len} does not fit in 32 bits")]
    TrailerTooLarge { len: usize },

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a video too large error.
    pub fn video_too_large(size: u64, limit: u64) -> Self {
        Self::VideoTooLarge { size, limit }
    }
}
