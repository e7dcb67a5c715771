//! Motion photo assembly.
//!
//! A motion photo is built in four strictly ordered steps:
//!
//! 1. Seed the output file with the image bytes
//! 2. Append the SEF trailer embedding the video
//! 3. Write the Samsung motion photo tags
//! 4. Write the Google MicroVideo tags, including the video offset
//!
//! Every precondition except the video size limit is checked before the output
//! file is touched. The size limit is enforced while building the trailer, so
//! an oversized video leaves a seeded output without a trailer. A failing
//! metadata writer likewise leaves image and trailer bytes without tags.

use crate::google::write_google_motion_metadata;
use crate::samsung::write_samsung_motion_metadata;
use crate::{Error, Result};
use motionphoto_av::MetadataWriter;
use motionphoto_sef::Trailer;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix Google Gallery requires on motion photo file names.
pub const MOTION_PREFIX: &str = "MV";

/// Options for [`create_motion_photo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionOptions {
    /// Key-frame time offset in microseconds.
    pub timestamp_us: Option<i64>,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl MotionOptions {
    /// Default options: no timestamp, no overwrite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key-frame timestamp.
    pub fn timestamp_us(mut self, timestamp_us: Option<i64>) -> Self {
        self.timestamp_us = timestamp_us;
        self
    }

    /// Allow replacing an existing output file.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Summary of a created motion photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionPhoto {
    /// Path of the created file.
    pub path: PathBuf,
    /// Distance from the end of the file back to the first video byte.
    pub negative_video_offset: u32,
    /// Length of the appended trailer.
    pub trailer_len: usize,
    /// Timestamp written to the metadata, if any.
    pub timestamp_us: Option<i64>,
}

/// Creates motion photos using an injected metadata writer.
///
/// # Example
///
/// ```no_run
/// use motionphoto::{MotionAssembler, MotionOptions};
/// use motionphoto_av::ExifTool;
/// use std::path::Path;
///
/// let assembler = MotionAssembler::new(ExifTool::discover(None));
/// let photo = assembler.create(
///     Path::new("IMG_0001.jpg"),
///     Path::new("IMG_0001.mp4"),
///     Path::new("out/MV_0001.jpg"),
///     &MotionOptions::new().timestamp_us(Some(1_500_000)),
/// )?;
/// println!("video offset: {}", photo.negative_video_offset);
/// # Ok::<(), motionphoto::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MotionAssembler<W> {
    writer: W,
}

impl<W: MetadataWriter> MotionAssembler<W> {
    /// Create an assembler writing tags through `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// The metadata writer in use.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Create a motion photo at `motion` from `image` and `video`.
    pub fn create(
        &self,
        image: &Path,
        video: &Path,
        motion: &Path,
        options: &MotionOptions,
    ) -> Result<MotionPhoto> {
        create_motion_photo(&self.writer, image, video, motion, options)
    }
}

/// Create a motion photo at `motion` from `image` and `video`.
///
/// # Errors
///
/// - [`Error::ImageNotFound`] / [`Error::VideoNotFound`] if an input is missing
/// - [`Error::OutputExists`] if `motion` exists and `overwrite` is not set
/// - [`Error::InvalidName`] if the file name of `motion` does not start with `MV`
/// - [`Error::Trailer`] if the video is too large to embed
/// - [`Error::Metadata`] if the metadata writer fails
/// - [`Error::Io`] for any copy or append failure
pub fn create_motion_photo<W: MetadataWriter + ?Sized>(
    writer: &W,
    image: &Path,
    video: &Path,
    motion: &Path,
    options: &MotionOptions,
) -> Result<MotionPhoto> {
    if !image.exists() {
        return Err(Error::ImageNotFound {
            path: image.to_path_buf(),
        });
    }
    if !video.exists() {
        return Err(Error::VideoNotFound {
            path: video.to_path_buf(),
        });
    }
    if motion.exists() && !options.overwrite {
        return Err(Error::OutputExists {
            path: motion.to_path_buf(),
        });
    }
    if !has_motion_name(motion) {
        return Err(Error::InvalidName {
            path: motion.to_path_buf(),
        });
    }

    if let Some(parent) = motion.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!("Creating output directory {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }

    if is_same_file(image, motion)? {
        debug!("Appending to image in place: {:?}", motion);
    } else {
        debug!("Seeding {:?} from {:?}", motion, image);
        fs::copy(image, motion)?;
    }

    let trailer = Trailer::encode_file(video)?;
    append(motion, &trailer)?;
    debug!(
        "Appended {} byte trailer to {:?} (video offset {})",
        trailer.len(),
        motion,
        trailer.negative_video_offset
    );

    write_samsung_motion_metadata(writer, motion, options.timestamp_us)?;
    write_google_motion_metadata(
        writer,
        motion,
        trailer.negative_video_offset,
        options.timestamp_us,
    )?;

    info!("Created motion photo {:?}", motion);

    Ok(MotionPhoto {
        path: motion.to_path_buf(),
        negative_video_offset: trailer.negative_video_offset,
        trailer_len: trailer.len(),
        timestamp_us: options.timestamp_us,
    })
}

/// Whether `path` has a file name Google Gallery treats as a motion photo.
pub fn has_motion_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with(MOTION_PREFIX))
        .unwrap_or(false)
}

/// Whether `a` and `b` name the same file on disk, hard links included.
///
/// Returns `false` when either path does not exist.
pub fn is_same_file(a: &Path, b: &Path) -> Result<bool> {
    if !a.exists() || !b.exists() {
        return Ok(false);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
        Ok(a.dev() == b.dev() && a.ino() == b.ino())
    }

    #[cfg(not(unix))]
    {
        Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
    }
}

fn append(motion: &Path, trailer: &Trailer) -> Result<()> {
    let mut file = OpenOptions::new().append(true).open(motion)?;
    file.write_all(&trailer.data)?;
    file.flush()?;
    Ok(())
}
