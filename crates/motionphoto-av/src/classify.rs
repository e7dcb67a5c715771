//! File classification for motion photo inputs.
//!
//! Files are classified by their magic bytes first and by extension only when
//! the content is not recognised.

use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image formats recognised as motion photo stills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG/JFIF, the only format both galleries play as a motion photo.
    Jpeg,
    /// PNG, recognised but not accepted as a still.
    Png,
    /// HEIF/HEIC by `ftyp` brand.
    Heif,
}

/// Broad kind of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A still image.
    Image(ImageFormat),
    /// A video container.
    Video,
    /// Anything else.
    Other,
}

impl FileKind {
    /// Whether this is an image of any format.
    pub fn is_image(&self) -> bool {
        matches!(self, FileKind::Image(_))
    }

    /// Whether this is a video.
    pub fn is_video(&self) -> bool {
        matches!(self, FileKind::Video)
    }
}

const IMAGE_EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("heic", ImageFormat::Heif),
    ("heif", ImageFormat::Heif),
];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "3gp", "mkv", "webm"];

const HEIF_BRANDS: &[&[u8; 4]] = &[b"heic", b"heix", b"hevc", b"hevx", b"mif1", b"msf1"];

/// Classify a file by content, falling back to its extension.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if the file does not exist.
pub fn classify(path: &Path) -> Result<FileKind> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path)
        } else {
            Error::Io(e)
        }
    })?;

    let mut magic = [0u8; 12];
    let mut filled = 0;
    while filled < magic.len() {
        let n = file.read(&mut magic[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    Ok(classify_bytes(&magic[..filled]).unwrap_or_else(|| classify_extension(path)))
}

/// Classify a file header. Returns `None` if the magic bytes are unknown.
pub fn classify_bytes(magic: &[u8]) -> Option<FileKind> {
    if magic.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(FileKind::Image(ImageFormat::Jpeg));
    }

    if magic.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(FileKind::Image(ImageFormat::Png));
    }

    // Matroska/WebM EBML header
    if magic.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return Some(FileKind::Video);
    }

    if magic.len() < 8 {
        return None;
    }

    // ISO BMFF: HEIF stills share the ftyp box with MP4/MOV
    if &magic[4..8] == b"ftyp" {
        if magic.len() >= 12 && HEIF_BRANDS.iter().any(|brand| &magic[8..12] == *brand) {
            return Some(FileKind::Image(ImageFormat::Heif));
        }
        return Some(FileKind::Video);
    }

    // QuickTime files may start with other top-level atoms
    match &magic[4..8] {
        b"moov" | b"mdat" | b"free" | b"wide" => Some(FileKind::Video),
        _ => None,
    }
}

/// Classify a path by its extension alone.
pub fn classify_extension(path: &Path) -> FileKind {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FileKind::Other;
    };
    let ext = ext.to_lowercase();

    if let Some((_, format)) = IMAGE_EXTENSIONS.iter().find(|(e, _)| *e == ext) {
        return FileKind::Image(*format);
    }
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return FileKind::Video;
    }
    FileKind::Other
}

/// Check whether a file is a JPEG image.
pub fn is_jpeg(path: &Path) -> Result<bool> {
    Ok(classify(path)? == FileKind::Image(ImageFormat::Jpeg))
}
