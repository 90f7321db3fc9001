//! Frame walking
//!
//! Each frame is a 10-byte header followed by its payload:
//!
//! ```text
//! offset  size  field
//! 0       4     identifier (ASCII)
//! 4       4     payload size (synchsafe in v2.4, big-endian in v2.3)
//! 8       2     flags (ignored)
//! 10      n     payload
//! ```

use crate::header::{decode_synchsafe, TagHeader};
use tracing::debug;

/// Length of a frame header
pub const FRAME_HEADER_LEN: usize = 10;

/// One frame borrowed from the tag buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Four-character identifier
    pub id: [u8; 4],

    /// Payload bytes, exactly as long as the declared size
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Identifier as text (empty if not ASCII)
    pub fn id_str(&self) -> &str {
        std::str::from_utf8(&self.id).unwrap_or("")
    }

    /// Whether this is a text frame handled by the text decoder
    ///
    /// `TXXX` carries a description plus value and is excluded.
    pub fn is_text(&self) -> bool {
        self.id[0] == b'T' && &self.id != b"TXXX"
    }
}

/// Iterator over the frames of a tag
///
/// Stops at padding (an all-zero identifier), or before any frame whose
/// header or payload would run past the declared tag size or the buffer end.
/// Frames yielded before the stop are unaffected.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    buffer: &'a [u8],
    offset: usize,
    limit: usize,
    synchsafe_sizes: bool,
}

impl<'a> FrameIter<'a> {
    /// Walk the frames of the tag described by `header`
    pub fn new(buffer: &'a [u8], header: &TagHeader) -> Self {
        Self {
            buffer,
            offset: header.frames_start(buffer),
            limit: header.tag_end().min(buffer.len()),
            synchsafe_sizes: header.major_version == 4,
        }
    }

    fn finish(&mut self) -> Option<Frame<'a>> {
        self.offset = self.limit;
        None
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let header_end = self.offset.checked_add(FRAME_HEADER_LEN)?;
        if header_end > self.limit {
            return self.finish();
        }

        let raw = &self.buffer[self.offset..header_end];
        let id = [raw[0], raw[1], raw[2], raw[3]];
        if id == [0; 4] {
            return self.finish();
        }

        let size_bytes = [raw[4], raw[5], raw[6], raw[7]];
        let size = if self.synchsafe_sizes {
            decode_synchsafe(size_bytes)
        } else {
            u32::from_be_bytes(size_bytes)
        } as usize;

        let Some(payload_end) = header_end.checked_add(size).filter(|end| *end <= self.limit)
        else {
            debug!(
                frame = %String::from_utf8_lossy(&id),
                offset = self.offset,
                size,
                limit = self.limit,
                "Frame overruns tag, truncating parse"
            );
            return self.finish();
        };

        let payload = &self.buffer[header_end..payload_end];
        self.offset = payload_end;
        Some(Frame { id, payload })
    }
}
