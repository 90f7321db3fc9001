//! Attached picture (`APIC`) frames
//!
//! ```text
//! encoding (1) | MIME type, NUL | picture type (1) | description, NUL | image bytes
//! ```
//!
//! The MIME type is always Latin-1. The description terminator is one NUL
//! byte, or two for the UTF-16 encodings.

use crate::text::{decode_text, TextEncoding};
use tonearm_core::CoverArt;

/// Parse the payload of an `APIC` frame
///
/// Returns `None` if a terminator search runs past the payload. A picture
/// with no image bytes after the description is kept with empty data. Only
/// this frame is affected; the caller keeps parsing.
pub fn parse_picture(payload: &[u8]) -> Option<CoverArt> {
    let (&encoding, rest) = payload.split_first()?;

    let mime_end = find_nul(rest, 0)?;
    let mime_type = decode_text(0, &rest[..mime_end]);

    let type_offset = mime_end + 1;
    let picture_type = *rest.get(type_offset)?;

    let description_start = type_offset + 1;
    let wide = TextEncoding::from_selector(encoding).is_some_and(TextEncoding::is_wide);
    let (description_end, terminator_len) = if wide {
        (find_wide_nul(rest, description_start)?, 2)
    } else {
        (find_nul(rest, description_start)?, 1)
    };
    let description = decode_text(encoding, &rest[description_start..description_end]);

    let data = rest.get(description_end + terminator_len..).unwrap_or_default();
    Some(CoverArt::new(mime_type, picture_type, description, data))
}

fn find_nul(bytes: &[u8], start: usize) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|&b| b == 0)
        .map(|pos| start + pos)
}

fn find_wide_nul(bytes: &[u8], start: usize) -> Option<usize> {
    bytes
        .get(start..)?
        .chunks_exact(2)
        .position(|pair| pair == [0, 0])
        .map(|pos| start + pos * 2)
}
