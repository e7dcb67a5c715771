//! Error types for motion photo creation.

use std::path::PathBuf;

/// Result type alias using the crate Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating a motion photo.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input image does not exist.
    #[error("Input image file does not exist: '{}'", path.display())]
    ImageNotFound { path: PathBuf },

    /// The input video does not exist.
    #[error("Input video file does not exist: '{}'", path.display())]
    VideoNotFound { path: PathBuf },

    /// The output exists and overwriting was not requested.
    #[error("Output motion photo file already exists: '{}'", path.display())]
    OutputExists { path: PathBuf },

    /// The output name is not recognised by Google Gallery.
    #[error(
        "Motion Photo name must start with '{}' for Google Gallery playback, path: '{}'",
        crate::motion::MOTION_PREFIX,
        path.display()
    )]
    InvalidName { path: PathBuf },

    /// The output would replace one of its own inputs.
    #[error("Output motion photo file is one of its inputs: '{}'", path.display())]
    OutputIsInput { path: PathBuf },

    /// Building the SEF trailer failed.
    #[error(transparent)]
    Trailer(#[from] motionphoto_sef::Error),

    /// Writing metadata tags failed.
    #[error(transparent)]
    Metadata(#[from] motionphoto_av::Error),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ImageNotFound { path }
            | Self::VideoNotFound { path }
            | Self::OutputExists { path }
            | Self::InvalidName { path }
            | Self::OutputIsInput { path } => Some(path),
            _ => None,
        }
    }
}
