//! ID3v2 tag header
//!
//! ```text
//! offset  size  field
//! 0       3     "ID3"
//! 3       1     major version (3 or 4 supported)
//! 4       1     revision
//! 5       1     flags
//! 6       4     tag size, synchsafe, excluding this header
//! ```

/// Magic signature at offset 0
pub const MAGIC: &[u8; 3] = b"ID3";

/// Length of the fixed tag header
pub const HEADER_LEN: usize = 10;

/// Decode a synchsafe integer
///
/// Each byte contributes only its low 7 bits; the high bit is ignored.
pub fn decode_synchsafe(bytes: [u8; 4]) -> u32 {
    (u32::from(bytes[0] & 0x7f) << 21)
        | (u32::from(bytes[1] & 0x7f) << 14)
        | (u32::from(bytes[2] & 0x7f) << 7)
        | u32::from(bytes[3] & 0x7f)
}

/// Parsed fixed header of an ID3v2 tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    /// Major version (the `3` in ID3v2.3)
    pub major_version: u8,

    /// Revision number
    pub revision: u8,

    /// Header flags
    pub flags: u8,

    /// Size of the tag body in bytes, excluding the 10-byte header
    pub size: u32,
}

impl TagHeader {
    /// Flag bit announcing an extended header
    pub const FLAG_EXTENDED_HEADER: u8 = 0x40;

    /// Parse the header at the start of `buffer`
    ///
    /// Returns `None` when the buffer is too short or the magic is missing.
    pub fn parse(buffer: &[u8]) -> Option<Self> {
        let header = buffer.get(..HEADER_LEN)?;
        if &header[..3] != MAGIC {
            return None;
        }

        Some(Self {
            major_version: header[3],
            revision: header[4],
            flags: header[5],
            size: decode_synchsafe([header[6], header[7], header[8], header[9]]),
        })
    }

    /// Whether this parser understands the frame layout of this version
    pub fn is_supported(&self) -> bool {
        matches!(self.major_version, 3 | 4)
    }

    /// Whether an extended header follows the fixed header
    pub fn has_extended_header(&self) -> bool {
        self.flags & Self::FLAG_EXTENDED_HEADER != 0
    }

    /// Offset one past the last byte of the tag, as declared
    pub fn tag_end(&self) -> usize {
        HEADER_LEN.saturating_add(self.size as usize)
    }

    /// Offset of the first frame
    ///
    /// Skips the extended header when present. v2.3 declares its size
    /// excluding the 4 size bytes as a plain integer; v2.4 declares it
    /// synchsafe and inclusive.
    pub fn frames_start(&self, buffer: &[u8]) -> usize {
        if !self.has_extended_header() {
            return HEADER_LEN;
        }

        let Some(size_bytes) = buffer.get(HEADER_LEN..HEADER_LEN + 4) else {
            return self.tag_end();
        };
        let size_bytes = [size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]];

        let extended_len = if self.major_version == 4 {
            decode_synchsafe(size_bytes) as usize
        } else {
            (u32::from_be_bytes(size_bytes) as usize).saturating_add(4)
        };
        HEADER_LEN.saturating_add(extended_len)
    }
}
