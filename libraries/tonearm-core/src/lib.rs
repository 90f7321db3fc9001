//! Tonearm Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for Tonearm.
//!
//! This crate provides the foundational building blocks shared by the tag parser,
//! the importer, and the playback session.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `TrackMetadata`, `CoverArt`
//! - **Collaborator Traits**: `AudioBackend`, `DurationProbe`, `MetadataReader`, `LibraryStore`
//! - **Backend Events**: the closed `BackendEvent` set and the `EventHub` that delivers it
//! - **Error Handling**: unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tonearm_core::{LibraryStore, MemoryLibrary, Track, TrackMetadata};
//! use std::path::PathBuf;
//!
//! let metadata = TrackMetadata::from_file_name("01 - Intro.mp3");
//! let track = Track::from_metadata(metadata, PathBuf::from("/music/01 - Intro.mp3"));
//!
//! let library = MemoryLibrary::new();
//! library.add_track(track.clone()).unwrap();
//! library.record_recently_played(&track.id).unwrap();
//!
//! assert_eq!(library.recently_played().unwrap(), vec![track.id]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use events::{BackendEvent, EventHub, EventSubscription};
pub use storage::{MemoryLibrary, RECENTLY_PLAYED_LIMIT};
pub use traits::{AudioBackend, DurationProbe, LibraryStore, MetadataReader};
pub use types::{
    CoverArt, Track, TrackId, TrackMetadata, TrackUpdate, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};
