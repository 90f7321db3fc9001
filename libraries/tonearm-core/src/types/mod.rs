/// Domain types for Tonearm
mod cover_art;
mod ids;
mod track;

pub use cover_art::CoverArt;
pub use ids::TrackId;
pub use track::{Track, TrackMetadata, TrackUpdate, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
