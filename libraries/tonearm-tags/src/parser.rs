/// ID3v2 tag parser
use crate::frame::{Frame, FrameIter};
use crate::header::TagHeader;
use crate::picture::parse_picture;
use crate::text::{decode_text_frame, parse_track_number};
use tonearm_core::{CoverArt, TrackMetadata};
use tracing::debug;

/// Bytes read from the start of a file when looking for a tag
///
/// Tag headers sit at the start of the file, so this bounds parse cost
/// independently of file size.
pub const DEFAULT_PREFIX_BYTES: usize = 1024 * 1024;

/// Parse tag metadata with the default prefix limit
pub fn parse(buffer: &[u8], file_name: &str) -> TrackMetadata {
    TagParser::new().parse(buffer, file_name)
}

/// Parser for ID3v2.3 and ID3v2.4 tags
#[derive(Debug, Clone, Copy)]
pub struct TagParser {
    prefix_bytes: usize,
}

impl Default for TagParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TagParser {
    /// Create a parser reading at most [`DEFAULT_PREFIX_BYTES`]
    pub fn new() -> Self {
        Self {
            prefix_bytes: DEFAULT_PREFIX_BYTES,
        }
    }

    /// Create a parser with a custom prefix limit
    pub fn with_prefix_bytes(prefix_bytes: usize) -> Self {
        Self { prefix_bytes }
    }

    /// Maximum number of leading bytes considered
    pub fn prefix_bytes(&self) -> usize {
        self.prefix_bytes
    }

    /// Extract metadata from the leading bytes of an audio file
    ///
    /// Never fails. Without a supported tag the result holds only defaults
    /// derived from `file_name`. Duration is always left unresolved.
    pub fn parse(&self, buffer: &[u8], file_name: &str) -> TrackMetadata {
        let buffer = &buffer[..buffer.len().min(self.prefix_bytes)];
        let mut metadata = TrackMetadata::from_file_name(file_name);

        let Some(header) = TagHeader::parse(buffer) else {
            return metadata;
        };
        if !header.is_supported() {
            debug!(
                version = header.major_version,
                file_name, "Unsupported ID3v2 version, using defaults"
            );
            return metadata;
        }

        let mut fields = TagFields::default();
        for frame in FrameIter::new(buffer, &header) {
            fields.absorb(&frame);
        }
        fields.apply(&mut metadata);

        metadata
    }
}

/// Raw values collected during the frame walk
///
/// The first frame of each identifier wins. For the year, `TDRC` (v2.4
/// recording time) takes precedence over `TYER` (v2.3) whatever their order.
#[derive(Debug, Default)]
struct TagFields {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    recording_time: Option<String>,
    year: Option<String>,
    genre: Option<String>,
    track_number: Option<Option<u32>>,
    front_cover: Option<CoverArt>,
    first_picture: Option<CoverArt>,
}

impl TagFields {
    fn absorb(&mut self, frame: &Frame<'_>) {
        if frame.is_text() {
            let slot = match &frame.id {
                b"TIT2" => &mut self.title,
                b"TPE1" => &mut self.artist,
                b"TALB" => &mut self.album,
                b"TDRC" => &mut self.recording_time,
                b"TYER" => &mut self.year,
                b"TCON" => &mut self.genre,
                b"TRCK" => {
                    if self.track_number.is_none() {
                        let text = decode_text_frame(frame.payload);
                        self.track_number = Some(parse_track_number(&text));
                    }
                    return;
                }
                _ => return,
            };
            if slot.is_none() {
                *slot = Some(decode_text_frame(frame.payload));
            }
            return;
        }

        if &frame.id == b"APIC" {
            match parse_picture(frame.payload) {
                Some(picture) if picture.is_front_cover() && self.front_cover.is_none() => {
                    self.front_cover = Some(picture);
                }
                Some(picture) if self.first_picture.is_none() => {
                    self.first_picture = Some(picture);
                }
                Some(_) => {}
                None => debug!(size = frame.payload.len(), "Skipping malformed APIC frame"),
            }
        }
    }

    fn apply(self, metadata: &mut TrackMetadata) {
        if let Some(title) = self.title.filter(|t| !t.is_empty()) {
            metadata.title = title;
        }
        if let Some(artist) = self.artist.filter(|a| !a.is_empty()) {
            metadata.artist = artist;
        }
        if let Some(album) = self.album.filter(|a| !a.is_empty()) {
            metadata.album = album;
        }
        metadata.year = self.recording_time.or(self.year);
        metadata.genre = self.genre;
        metadata.track_number = self.track_number.flatten();
        metadata.cover_art = self.front_cover.or(self.first_picture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4_frame(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let len = payload.len() as u32;
        let mut bytes = id.to_vec();
        bytes.extend_from_slice(&[
            ((len >> 21) & 0x7f) as u8,
            ((len >> 14) & 0x7f) as u8,
            ((len >> 7) & 0x7f) as u8,
            (len & 0x7f) as u8,
            0,
            0,
        ]);
        bytes.extend_from_slice(payload);
        bytes
    }

    fn v4_tag(frames: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = frames.concat();
        let len = body.len() as u32;
        let mut tag = b"ID3\x04\x00\x00".to_vec();
        tag.extend_from_slice(&[
            ((len >> 21) & 0x7f) as u8,
            ((len >> 14) & 0x7f) as u8,
            ((len >> 7) & 0x7f) as u8,
            (len & 0x7f) as u8,
        ]);
        tag.extend(body);
        tag
    }

    #[test]
    fn no_signature_returns_defaults() {
        let meta = parse(b"\xff\xfb\x90\x00 raw mpeg frames", "Song Title.mp3");
        assert_eq!(meta, TrackMetadata::from_file_name("Song Title.mp3"));
    }

    #[test]
    fn empty_text_frames_keep_defaults_for_required_fields() {
        let tag = v4_tag(&[v4_frame(b"TIT2", b"\x03"), v4_frame(b"TCON", b"\x03")]);
        let meta = parse(&tag, "fallback.mp3");
        assert_eq!(meta.title, "fallback");
        assert_eq!(meta.genre.as_deref(), Some(""));
    }

    #[test]
    fn tdrc_wins_over_tyer_in_any_order() {
        let tag = v4_tag(&[
            v4_frame(b"TDRC", b"\x032004-05-01"),
            v4_frame(b"TYER", b"\x031999"),
        ]);
        assert_eq!(parse(&tag, "a.mp3").year.as_deref(), Some("2004-05-01"));

        let tag = v4_tag(&[
            v4_frame(b"TYER", b"\x031999"),
            v4_frame(b"TDRC", b"\x032004"),
        ]);
        assert_eq!(parse(&tag, "a.mp3").year.as_deref(), Some("2004"));

        let tag = v4_tag(&[v4_frame(b"TYER", b"\x031999")]);
        assert_eq!(parse(&tag, "a.mp3").year.as_deref(), Some("1999"));
    }

    #[test]
    fn front_cover_preferred_over_other_pictures() {
        let tag = v4_tag(&[
            v4_frame(b"APIC", b"\x00image/png\x00\x04\x00back"),
            v4_frame(b"APIC", b"\x00image/jpeg\x00\x03\x00front"),
        ]);
        let art = parse(&tag, "a.mp3").cover_art.unwrap();
        assert_eq!(&art.data[..], b"front");

        let tag = v4_tag(&[v4_frame(b"APIC", b"\x00image/png\x00\x04\x00back")]);
        let art = parse(&tag, "a.mp3").cover_art.unwrap();
        assert_eq!(&art.data[..], b"back");
    }

    #[test]
    fn unparsable_track_number_is_unset() {
        let tag = v4_tag(&[v4_frame(b"TRCK", b"\x03side A")]);
        assert_eq!(parse(&tag, "a.mp3").track_number, None);
    }

    #[test]
    fn prefix_limit_is_applied() {
        let tag = v4_tag(&[
            v4_frame(b"TIT2", b"\x03Early"),
            v4_frame(b"TPE1", b"\x03Late"),
        ]);
        // Room for the header and the first frame only
        let parser = TagParser::with_prefix_bytes(10 + 10 + 6);
        let meta = parser.parse(&tag, "a.mp3");
        assert_eq!(meta.title, "Early");
        assert_eq!(meta.artist, "Unknown Artist");
    }

    #[test]
    fn unsupported_version_returns_defaults() {
        let mut tag = v4_tag(&[v4_frame(b"TIT2", b"\x03Ignored")]);
        tag[3] = 2;
        assert_eq!(parse(&tag, "v22.mp3").title, "v22");
    }
}
