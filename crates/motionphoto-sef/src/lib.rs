//! # motionphoto-sef
//!
//! Encoder for the Samsung Extra Format (SEF) trailer used by motion photos.
//!
//! A motion photo is an ordinary image file with a trailer appended to it.
//! The trailer embeds the video clip as a record and ends with a SEF index
//! that viewers walk backward from the end of the file:
//!
//! 1. Read the last 8 bytes: the SEF data size followed by `SEFT`
//! 2. Jump back by that size to the `SEFH` header
//! 3. Read the record count and one 12-byte index entry per record
//! 4. Each entry gives the record's distance back from `SEFH` and its span
//!
//! # Modules
//!
//! - `builder` - Generic SEF block builder (N records)
//! - `trailer` - Motion photo trailer with a single embedded video record
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support

mod error;

pub mod builder;
pub mod trailer;

pub use builder::{SefBuilder, Tag};
pub use error::{Error, Result};
pub use trailer::{check_video_len, Trailer, EMBEDDED_VIDEO_MARKER, MAX_VIDEO_LEN};
