//! Samsung motion photo trailer.

use crate::builder::SefBuilder;
use crate::{Error, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Record marker for an embedded motion photo video.
pub const EMBEDDED_VIDEO_MARKER: [u8; 4] = [0x00, 0x00, 0x30, 0x0A];

/// Record name preceding the embedded video payload.
pub const EMBEDDED_VIDEO_NAME: &[u8; 16] = b"MotionPhoto_Data";

/// Largest video that can be embedded.
///
/// Readers store the video offset in a signed 32-bit metadata field.
pub const MAX_VIDEO_LEN: u64 = i32::MAX as u64;

/// Bytes between the start of the video record and the video payload.
pub const VIDEO_RECORD_PREFIX_LEN: usize = 4 + 4 + EMBEDDED_VIDEO_NAME.len();

/// A SEF trailer ready to be appended to an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    /// Complete trailer bytes.
    pub data: Bytes,
    /// Distance from the end of `data` back to the first video byte.
    pub negative_video_offset: u32,
}

impl Trailer {
    /// Build the trailer embedding `video`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VideoTooLarge`] if `video` is longer than
    /// [`MAX_VIDEO_LEN`].
    ///
    /// # Example
    ///
    /// ```
    /// use motionphoto_sef::Trailer;
    ///
    /// let trailer = Trailer::encode(b"hello")?;
    /// let start = trailer.video_offset();
    /// assert_eq!(&trailer.data[start..start + 5], b"hello");
    /// # Ok::<(), motionphoto_sef::Error>(())
    /// ```
    pub fn encode(video: &[u8]) -> Result<Self> {
        check_video_len(video.len() as u64)?;

        let mut builder = SefBuilder::with_capacity(video.len() + 64);
        let video_offset = builder.push_record(EMBEDDED_VIDEO_MARKER, EMBEDDED_VIDEO_NAME, video)?;
        Self::from_builder(builder, video_offset)
    }

    /// Build the trailer from a video file.
    ///
    /// The size limit is checked against the file's metadata, so an oversized
    /// video is rejected without being read. The video is then read straight
    /// into the trailer buffer.
    pub fn encode_file<P: AsRef<Path>>(video: P) -> Result<Self> {
        let file = File::open(video.as_ref())?;
        let size = file.metadata()?.len();
        check_video_len(size)?;

        let mut builder = SefBuilder::with_capacity(size as usize + 64);
        let video_offset = builder.push_record_from(
            EMBEDDED_VIDEO_MARKER,
            EMBEDDED_VIDEO_NAME,
            file.take(MAX_VIDEO_LEN + 1),
            size as usize,
        )?;

        // The file may have grown since its metadata was read.
        check_video_len((builder.len() - video_offset as usize) as u64)?;

        Self::from_builder(builder, video_offset)
    }

    fn from_builder(builder: SefBuilder, video_offset: u32) -> Result<Self> {
        let data = builder.finish()?.freeze();

        let negative_video_offset = u32::try_from(data.len())
            .map(|len| len - video_offset)
            .map_err(|_| Error::TrailerTooLarge { len: data.len() })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            trailer_len = data.len(),
            negative_video_offset,
            "encoded motion photo trailer"
        );

        Ok(Self {
            data,
            negative_video_offset,
        })
    }

    /// Total trailer length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the trailer has no bytes; never the case for an encoded trailer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset of the first video byte from the start of the trailer.
    pub fn video_offset(&self) -> usize {
        self.data.len() - self.negative_video_offset as usize
    }
}

/// Check that a video of `len` bytes can be embedded.
pub fn check_video_len(len: u64) -> Result<()> {
    if len > MAX_VIDEO_LEN {
        return Err(Error::video_too_large(len, MAX_VIDEO_LEN));
    }
    Ok(())
}
