//! Google motion photo (MicroVideo) metadata.
//!
//! Google Gallery has no knowledge of the SEF index; it locates the video by
//! `MicroVideoOffset`, the distance from the end of the file back to the
//! first video byte.

use motionphoto_av::{MetadataTag, MetadataWriter};
use std::path::Path;

/// Timestamp written when the key frame is unknown.
pub const NO_TIMESTAMP: i64 = -1;

/// Tags marking `media` as a Google motion photo.
pub fn google_motion_tags(
    negative_video_offset: u32,
    timestamp_us: Option<i64>,
) -> Vec<MetadataTag> {
    vec![
        MetadataTag::new("MicroVideo", 1),
        MetadataTag::new("MicroVideoVersion", 1),
        MetadataTag::new("MicroVideoOffset", negative_video_offset),
        MetadataTag::new(
            "MicroVideoPresentationTimestampUs",
            timestamp_us.unwrap_or(NO_TIMESTAMP),
        ),
    ]
}

/// Write the Google motion photo tags into `media`.
pub fn write_google_motion_metadata<W: MetadataWriter + ?Sized>(
    writer: &W,
    media: &Path,
    negative_video_offset: u32,
    timestamp_us: Option<i64>,
) -> motionphoto_av::Result<()> {
    writer.write_tags(media, &google_motion_tags(negative_video_offset, timestamp_us))
}
