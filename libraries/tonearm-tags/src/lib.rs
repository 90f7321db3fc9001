//! Tonearm Tags
//!
//! Metadata extraction for Tonearm.
//!
//! This crate provides:
//! - An ID3v2.3 / ID3v2.4 tag parser working on raw bytes (`TagParser`)
//! - A bounded file-prefix reader and a `MetadataReader` built on it
//! - A lofty-backed `DurationProbe`, since duration is not stored in the tag
//!
//! Parsing is pure: it never fails and never panics. Malformed input yields
//! whatever fields were extracted before the damage, on top of defaults
//! derived from the file name.
//!
//! # Example
//!
//! ```rust
//! use tonearm_tags::TagParser;
//!
//! // "ID3" v2.4, one UTF-8 TIT2 frame
//! let mut tag = b"ID3\x04\x00\x00\x00\x00\x00\x10".to_vec();
//! tag.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00\x03Hello");
//!
//! let metadata = TagParser::new().parse(&tag, "track01.mp3");
//! assert_eq!(metadata.title, "Hello");
//! assert_eq!(metadata.artist, "Unknown Artist");
//! ```

mod error;
pub mod frame;
pub mod header;
mod parser;
mod picture;
mod probe;
mod reader;
pub mod text;

pub use error::{Result, TagError};
pub use parser::{parse, TagParser, DEFAULT_PREFIX_BYTES};
pub use picture::parse_picture;
pub use probe::LoftyDurationProbe;
pub use reader::{read_prefix, Id3MetadataReader};
