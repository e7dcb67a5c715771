//! Directory batch processing.
//!
//! Files in a directory are paired by stem: `IMG_0001.jpg` and
//! `IMG_0001.mp4` become `MVIMG_0001.jpg`. Pairs are processed one after the
//! other and a failure on one pair does not stop the rest. A pair whose
//! output would land on one of its own files is reported as failed.

use crate::motion::{is_same_file, MotionAssembler, MotionOptions, MotionPhoto, MOTION_PREFIX};
use crate::{Error, Result};
use motionphoto_av::{classify, FileKind, ImageFormat, MetadataWriter};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Options for [`run_batch`].
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Where motion photos are written. Defaults to the input directory.
    pub output_dir: Option<PathBuf>,
    /// Replace existing motion photos.
    pub overwrite: bool,
    /// Descend into subdirectories.
    pub recursive: bool,
}

/// An image and a video sharing a stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPair {
    pub image: PathBuf,
    pub video: PathBuf,
}

impl MediaPair {
    /// File stem shared by both files.
    pub fn stem(&self) -> String {
        self.image
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// A pair that could not be turned into a motion photo.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub pair: MediaPair,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Motion photos created.
    pub created: Vec<MotionPhoto>,
    /// Pairs that failed, with the error message.
    pub failed: Vec<BatchFailure>,
    /// Images or videos without a partner.
    pub unpaired: Vec<PathBuf>,
}

impl BatchReport {
    /// Whether every pair succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Default)]
struct Slot {
    image: Option<PathBuf>,
    video: Option<PathBuf>,
    extra: Vec<PathBuf>,
}

/// Group the JPEG images and videos under `dir` by stem.
///
/// Returns the complete pairs and the files left without a partner, both in
/// path order.
pub fn find_pairs(
    dir: &Path,
    recursive: bool,
    skip: Option<&Path>,
) -> Result<(Vec<MediaPair>, Vec<PathBuf>)> {
    if !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input directory does not exist: '{}'", dir.display()),
        )
        .into());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut slots: BTreeMap<PathBuf, Slot> = BTreeMap::new();

    for entry in WalkDir::new(dir)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| skip.map_or(true, |s| e.depth() == 0 || e.path() != s))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }

        let kind = match classify(path) {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        let slot = slots.entry(path.with_extension("")).or_default();
        match kind {
            FileKind::Image(ImageFormat::Jpeg) if slot.image.is_none() => {
                slot.image = Some(path.to_path_buf())
            }
            FileKind::Video if slot.video.is_none() => slot.video = Some(path.to_path_buf()),
            FileKind::Image(ImageFormat::Jpeg) | FileKind::Video => {
                slot.extra.push(path.to_path_buf())
            }
            _ => debug!("Ignoring {:?} ({:?})", path, kind),
        }
    }

    let mut pairs = Vec::new();
    let mut unpaired = Vec::new();
    for slot in slots.into_values() {
        match (slot.image, slot.video) {
            (Some(image), Some(video)) => pairs.push(MediaPair { image, video }),
            (image, video) => unpaired.extend(image.into_iter().chain(video)),
        }
        unpaired.extend(slot.extra);
    }

    Ok((pairs, unpaired))
}

/// Output path for `pair`, mirroring its location below `input_dir`.
pub fn motion_path(pair: &MediaPair, input_dir: &Path, output_dir: &Path) -> PathBuf {
    let stem = pair.stem();
    let name = if stem.starts_with(MOTION_PREFIX) {
        stem
    } else {
        format!("{MOTION_PREFIX}{stem}")
    };
    let file_name = match pair.image.extension() {
        Some(ext) => format!("{name}.{}", ext.to_string_lossy()),
        None => name,
    };

    let relative = pair
        .image
        .parent()
        .and_then(|p| p.strip_prefix(input_dir).ok())
        .unwrap_or_else(|| Path::new(""));
    output_dir.join(relative).join(file_name)
}

/// Create a motion photo for every image/video pair under `dir`.
///
/// Pairs are processed sequentially; failures are collected in the report.
pub fn run_batch<W: MetadataWriter>(
    assembler: &MotionAssembler<W>,
    dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let output_dir = options.output_dir.as_deref().unwrap_or(dir);
    let skip = options.output_dir.as_deref().filter(|o| *o != dir);
    let (pairs, unpaired) = find_pairs(dir, options.recursive, skip)?;

    info!(
        "Found {} pairs ({} unpaired files) in {:?}",
        pairs.len(),
        unpaired.len(),
        dir
    );

    let motion_options = MotionOptions::new().overwrite(options.overwrite);
    let mut report = BatchReport {
        unpaired,
        ..Default::default()
    };

    let total = pairs.len();
    for (idx, pair) in pairs.into_iter().enumerate() {
        let motion = motion_path(&pair, dir, output_dir);
        info!("[{}/{}] {:?}", idx + 1, total, motion);

        if targets_input(&pair, &motion) {
            let err = Error::OutputIsInput { path: motion };
            warn!("Skipping {:?}: {}", pair.image, err);
            report.failed.push(BatchFailure {
                pair,
                message: err.to_string(),
            });
            continue;
        }

        match assembler.create(&pair.image, &pair.video, &motion, &motion_options) {
            Ok(photo) => report.created.push(photo),
            Err(e) => {
                warn!("Failed to create {:?}: {}", motion, e);
                report.failed.push(BatchFailure {
                    pair,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Whether writing to `motion` would modify one of the pair's own files.
fn targets_input(pair: &MediaPair, motion: &Path) -> bool {
    [&pair.image, &pair.video]
        .into_iter()
        .any(|input| input == motion || matches!(is_same_file(input, motion), Ok(true)))
}
