//! Samsung motion photo metadata.
//!
//! Samsung viewers find the video through the SEF trailer; the tags only flag
//! the file as a motion photo and carry the optional key-frame timestamp.

use motionphoto_av::{MetadataTag, MetadataWriter};
use std::path::Path;

/// Tags marking `media` as a Samsung motion photo.
///
/// The presentation timestamp tag is only emitted when a timestamp is known.
pub fn samsung_motion_tags(timestamp_us: Option<i64>) -> Vec<MetadataTag> {
    let mut tags = vec![
        MetadataTag::new("MotionPhoto", 1),
        MetadataTag::new("MotionPhotoVersion", 1),
    ];
    if let Some(timestamp_us) = timestamp_us {
        tags.push(MetadataTag::new(
            "MotionPhotoPresentationTimestampUs",
            timestamp_us,
        ));
    }
    tags
}

/// Write the Samsung motion photo tags into `media`.
pub fn write_samsung_motion_metadata<W: MetadataWriter + ?Sized>(
    writer: &W,
    media: &Path,
    timestamp_us: Option<i64>,
) -> motionphoto_av::Result<()> {
    writer.write_tags(media, &samsung_motion_tags(timestamp_us))
}
