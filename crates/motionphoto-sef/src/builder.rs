//! SEF block builder.
//!
//! A SEF block is a sequence of records followed by an index that can be
//! walked backward from the end of the file:
//!
//! ```text
//! [marker][name len][name][payload] ...        one per record
//! [b"SEFH"][version][record count]
//! [marker][offset back from SEFH][span] ...     one per record
//! [size of SEFH..index][b"SEFT"]
//! ```

use crate::{Error, Result};
use bytes::{BufMut, BytesMut};
use std::io::{self, Read};

/// Marker opening the SEF header.
pub const SEF_HEAD: &[u8; 4] = b"SEFH";

/// Marker closing the SEF block.
pub const SEF_TAIL: &[u8; 4] = b"SEFT";

/// SEF format version written into the header.
pub const SEF_VERSION: u32 = 106;

/// Size of one index entry: marker + offset + span.
pub const INDEX_ENTRY_LEN: usize = 12;

/// One indexed record inside the trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Byte offset of the record from the start of the trailer.
    pub offset: u32,
    /// Record marker, `None` for the SEF header itself.
    pub marker: Option<[u8; 4]>,
}

/// Builder for a SEF block.
///
/// Records are appended in order with [`push_record`](Self::push_record);
/// [`finish`](Self::finish) writes the header, index and tail.
#[derive(Debug, Default)]
pub struct SefBuilder {
    buf: BytesMut,
    tags: Vec<Tag>,
}

impl SefBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            tags: Vec::new(),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Records pushed so far, in insertion order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Append a record and return the trailer offset of its first payload byte.
    pub fn push_record(&mut self, marker: [u8; 4], name: &[u8], payload: &[u8]) -> Result<u32> {
        let payload_offset = self.begin_record(marker, name, payload.len())?;
        self.buf.put_slice(payload);

        // The next record (or the header) must still be addressable.
        self.offset()?;

        Ok(payload_offset)
    }

    /// Append a record whose payload is read to the end of `payload`.
    ///
    /// The payload is copied straight into the block, so no second copy of it
    /// is held in memory. `size_hint` is reserved up front.
    pub fn push_record_from<R: Read>(
        &mut self,
        marker: [u8; 4],
        name: &[u8],
        mut payload: R,
        size_hint: usize,
    ) -> Result<u32> {
        let payload_offset = self.begin_record(marker, name, size_hint)?;
        io::copy(&mut payload, &mut (&mut self.buf).writer())?;

        self.offset()?;

        Ok(payload_offset)
    }

    fn begin_record(&mut self, marker: [u8; 4], name: &[u8], payload_len: usize) -> Result<u32> {
        let offset = self.offset()?;
        let name_len = u32::try_from(name.len()).map_err(|_| Error::TrailerTooLarge {
            len: name.len(),
        })?;
        self.tags.push(Tag {
            offset,
            marker: Some(marker),
        });

        self.buf.reserve(8 + name.len() + payload_len);
        self.buf.put_slice(&marker);
        self.buf.put_u32_le(name_len);
        self.buf.put_slice(name);

        self.offset()
    }

    /// Write the SEF header, index and tail, returning the finished block.
    pub fn finish(mut self) -> Result<BytesMut> {
        let sef_offset = self.offset()?;
        let record_count = self.tags.len() as u32;
        self.tags.push(Tag {
            offset: sef_offset,
            marker: None,
        });

        self.buf.reserve(12 + self.tags.len() * INDEX_ENTRY_LEN + 8);
        self.buf.put_slice(SEF_HEAD);
        self.buf.put_u32_le(SEF_VERSION);
        self.buf.put_u32_le(record_count);

        for pair in self.tags.windows(2) {
            let (tag, next) = (pair[0], pair[1]);
            let Some(marker) = tag.marker else {
                continue;
            };
            self.buf.put_slice(&marker);
            self.buf.put_u32_le(sef_offset - tag.offset);
            self.buf.put_u32_le(next.offset - tag.offset);
        }

        let sef_data_size = self.offset()? - sef_offset;
        self.buf.put_u32_le(sef_data_size);
        self.buf.put_slice(SEF_TAIL);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            records = record_count,
            sef_offset,
            len = self.buf.len(),
            "SEF block finished"
        );

        Ok(self.buf)
    }

    fn offset(&self) -> Result<u32> {
        u32::try_from(self.buf.len()).map_err(|_| Error::TrailerTooLarge {
            len: self.buf.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(data: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(data[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_empty_block() {
        let data = SefBuilder::new().finish().unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(b"SEFH");
        expected.extend_from_slice(&106u32.to_le_bytes());
        expected.extend_from_slice(&0u32.to_le_bytes());
        expected.extend_from_slice(&12u32.to_le_bytes());
        expected.extend_from_slice(b"SEFT");
        assert_eq!(&data[..], &expected[..]);
    }

    #[test]
    fn test_push_record_returns_payload_offset() {
        let mut builder = SefBuilder::new();
        let first = builder.push_record(*b"AAAA", b"ab", b"xyz").unwrap();
        assert_eq!(first, 10);
        assert_eq!(builder.len(), 13);

        let second = builder.push_record(*b"BBBB", b"", b"q").unwrap();
        assert_eq!(second, 13 + 8);
        assert_eq!(
            builder.tags(),
            &[
                Tag {
                    offset: 0,
                    marker: Some(*b"AAAA")
                },
                Tag {
                    offset: 13,
                    marker: Some(*b"BBBB")
                },
            ]
        );
    }

    #[test]
    fn test_push_record_from_reader() {
        let payload: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();

        let mut expected = SefBuilder::new();
        let expected_offset = expected.push_record(*b"AAAA", b"name", &payload).unwrap();

        let mut streamed = SefBuilder::new();
        let offset = streamed
            .push_record_from(*b"AAAA", b"name", io::Cursor::new(&payload), 0)
            .unwrap();

        assert_eq!(offset, expected_offset);
        assert_eq!(streamed.tags(), expected.tags());
        assert_eq!(streamed.finish().unwrap(), expected.finish().unwrap());
    }

    #[test]
    fn test_multiple_records_index() {
        let mut builder = SefBuilder::new();
        builder.push_record(*b"AAAA", b"first", b"12345").unwrap();
        builder.push_record(*b"BBBB", b"second", b"").unwrap();
        let data = builder.finish().unwrap();

        // record A: 0..18, record B: 18..32, SEFH at 32
        let sef_offset = 32;
        assert_eq!(&data[sef_offset..sef_offset + 4], b"SEFH");
        assert_eq!(read_u32(&data, sef_offset + 4), SEF_VERSION);
        assert_eq!(read_u32(&data, sef_offset + 8), 2);

        let entry_a = sef_offset + 12;
        assert_eq!(&data[entry_a..entry_a + 4], b"AAAA");
        assert_eq!(read_u32(&data, entry_a + 4), 32);
        assert_eq!(read_u32(&data, entry_a + 8), 18);

        let entry_b = entry_a + INDEX_ENTRY_LEN;
        assert_eq!(&data[entry_b..entry_b + 4], b"BBBB");
        assert_eq!(read_u32(&data, entry_b + 4), 14);
        assert_eq!(read_u32(&data, entry_b + 8), 14);

        let tail = entry_b + INDEX_ENTRY_LEN;
        assert_eq!(read_u32(&data, tail), 12 + 2 * INDEX_ENTRY_LEN as u32);
        assert_eq!(&data[tail + 4..], b"SEFT");
        assert_eq!(data.len(), tail + 8);
    }
}
