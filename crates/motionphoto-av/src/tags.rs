//! Metadata tags and the writer capability.

use crate::Result;
use std::fmt;
use std::path::Path;

/// A single metadata tag assignment, rendered as `-Name=value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataTag {
    /// Tag name as understood by the metadata tool.
    pub name: String,
    /// Value to assign.
    pub value: String,
}

impl MetadataTag {
    /// Create a tag from a name and any displayable value.
    pub fn new(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// Command-line form of the tag.
    pub fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MetadataTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}={}", self.name, self.value)
    }
}

/// Something that can write metadata tags into an existing media file.
///
/// Implemented by [`ExifTool`](crate::ExifTool); tests substitute recorders so
/// that no external process is spawned.
pub trait MetadataWriter {
    /// Write `tags` into `media` in place.
    ///
    /// # Errors
    ///
    /// Fails with a descriptive error if the tags could not be written.
    fn write_tags(&self, media: &Path, tags: &[MetadataTag]) -> Result<()>;
}

impl<W: MetadataWriter + ?Sized> MetadataWriter for &W {
    fn write_tags(&self, media: &Path, tags: &[MetadataTag]) -> Result<()> {
        (**self).write_tags(media, tags)
    }
}

impl<W: MetadataWriter + ?Sized> MetadataWriter for Box<W> {
    fn write_tags(&self, media: &Path, tags: &[MetadataTag]) -> Result<()> {
        (**self).write_tags(media, tags)
    }
}
