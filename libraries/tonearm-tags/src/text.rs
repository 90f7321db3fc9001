//! Text frame decoding

/// Text encodings selectable by the first byte of a text frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// ISO-8859-1
    Latin1,
    /// UTF-16 with byte-order mark
    Utf16,
    /// UTF-16 big-endian without BOM
    Utf16Be,
    /// UTF-8
    Utf8,
}

impl TextEncoding {
    /// Map an encoding selector byte
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0 => Some(Self::Latin1),
            1 => Some(Self::Utf16),
            2 => Some(Self::Utf16Be),
            3 => Some(Self::Utf8),
            _ => None,
        }
    }

    /// Whether strings in this encoding end with a two-byte terminator
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Utf16 | Self::Utf16Be)
    }

    /// Decode bytes in this encoding
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Latin1 => bytes.iter().copied().map(char::from).collect(),
            Self::Utf16 => decode_utf16_with_bom(bytes),
            Self::Utf16Be => decode_utf16(bytes, true),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Decode a string given its encoding selector
///
/// Unknown selectors get a strict UTF-8 attempt and decode to an empty
/// string when that fails. The result stops at the first NUL, which drops
/// terminators and any additional v2.4 values.
pub fn decode_text(selector: u8, bytes: &[u8]) -> String {
    let decoded = match TextEncoding::from_selector(selector) {
        Some(encoding) => encoding.decode(bytes),
        None => String::from_utf8(bytes.to_vec()).unwrap_or_default(),
    };

    match decoded.find('\0') {
        Some(end) => decoded[..end].to_string(),
        None => decoded,
    }
}

/// Decode the payload of a text frame (selector byte + text)
pub fn decode_text_frame(payload: &[u8]) -> String {
    match payload.split_first() {
        Some((&selector, text)) => decode_text(selector, text),
        None => String::new(),
    }
}

/// Parse a `TRCK` value such as `"3"` or `"3/12"`
///
/// Only the leading run of decimal digits counts, after an optional `+`;
/// anything else leaves the track number unset.
pub fn parse_track_number(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().ok()
}

fn decode_utf16_with_bom(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, false),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, true),
        _ => decode_utf16(bytes, false),
    }
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> String {
    let units = bytes.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        assert_eq!(decode_text_frame(b"\x00Caf\xe9"), "Café");
    }

    #[test]
    fn utf16_honors_byte_order_mark() {
        assert_eq!(decode_text_frame(b"\x01\xff\xfeH\x00i\x00"), "Hi");
        assert_eq!(decode_text_frame(b"\x01\xfe\xff\x00H\x00i"), "Hi");
        // No BOM: little-endian
        assert_eq!(decode_text_frame(b"\x01H\x00i\x00"), "Hi");
    }

    #[test]
    fn utf16be_without_bom() {
        assert_eq!(decode_text_frame(b"\x02\x00O\x00K"), "OK");
    }

    #[test]
    fn utf8_and_terminators() {
        assert_eq!(decode_text_frame("\u{3}Ünïcødé\0".as_bytes()), "Ünïcødé");
        assert_eq!(decode_text_frame(b"\x03Rock\x00Pop"), "Rock");
        assert_eq!(decode_text_frame(b"\x01\xff\xfeA\x00\x00\x00"), "A");
    }

    #[test]
    fn unknown_selector_falls_back_to_strict_utf8() {
        assert_eq!(decode_text_frame(b"\x07plain"), "plain");
        assert_eq!(decode_text_frame(b"\x07\xff\xfe\xfd"), "");
    }

    #[test]
    fn empty_payloads_decode_to_empty_strings() {
        assert_eq!(decode_text_frame(b""), "");
        assert_eq!(decode_text_frame(b"\x03"), "");
    }

    #[test]
    fn odd_utf16_byte_is_dropped() {
        assert_eq!(decode_text_frame(b"\x02\x00A\x00"), "A");
    }

    #[test]
    fn track_number_takes_leading_digits() {
        assert_eq!(parse_track_number("7"), Some(7));
        assert_eq!(parse_track_number("3/12"), Some(3));
        assert_eq!(parse_track_number(" 04"), Some(4));
        assert_eq!(parse_track_number("12abc"), Some(12));
        assert_eq!(parse_track_number("abc"), None);
        assert_eq!(parse_track_number(""), None);
        assert_eq!(parse_track_number("/12"), None);
        assert_eq!(parse_track_number("99999999999"), None);
        assert_eq!(parse_track_number("+5/10"), Some(5));
        assert_eq!(parse_track_number("++5"), None);
        assert_eq!(parse_track_number("-2"), None);
    }
}
