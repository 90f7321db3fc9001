/// Collaborator traits for Tonearm
use crate::error::Result;
use crate::events::EventSubscription;
use crate::types::{Track, TrackId, TrackMetadata, TrackUpdate};
use std::path::Path;

/// Audio output backend
///
/// The backend decodes and plays audio on its own schedule. Commands are
/// fire-and-forget from the caller's point of view; outcomes that happen
/// later are reported as [`crate::BackendEvent`]s through [`subscribe`].
///
/// [`subscribe`]: AudioBackend::subscribe
pub trait AudioBackend: Send {
    /// Load a source and wait until it is ready to play
    ///
    /// # Errors
    /// Returns an error if the source is unsupported or cannot be opened
    fn load_source(&mut self, source: &Path) -> Result<()>;

    /// Start or resume playback
    ///
    /// # Errors
    /// Returns an error if the backend rejects playback (e.g. device busy)
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to a position in seconds
    fn seek(&mut self, position_secs: f64) -> Result<()>;

    /// Set the output volume, in `[0, 1]`
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Register for backend events
    fn subscribe(&mut self) -> EventSubscription;
}

/// Metadata-only probe used to resolve a source's duration
///
/// Loads just enough of the source to read its duration, then discards it.
pub trait DurationProbe: Send + Sync {
    /// Duration of the source in seconds
    fn probe_duration(&self, source: &Path) -> Result<f64>;
}

/// Reads tag metadata from audio files
pub trait MetadataReader: Send + Sync {
    /// Read metadata from a file
    ///
    /// # Errors
    /// Returns an error only if the file cannot be read; malformed tags
    /// produce best-effort metadata
    fn read(&self, path: &Path) -> Result<TrackMetadata>;
}

/// Durable library catalog owned outside the playback core
///
/// Holds the track catalog, the favorites set, and the recently played list.
/// Methods take `&self` so one store can be shared between the importer and
/// the playback session.
pub trait LibraryStore: Send + Sync {
    /// Add a track to the catalog
    fn add_track(&self, track: Track) -> Result<()>;

    /// Get a track by ID
    fn get_track(&self, id: &TrackId) -> Result<Option<Track>>;

    /// All tracks in insertion order
    fn tracks(&self) -> Result<Vec<Track>>;

    /// Apply a partial update and return the updated track
    fn update_track(&self, id: &TrackId, update: &TrackUpdate) -> Result<Track>;

    /// Remove a track, also dropping it from favorites and recently played
    fn remove_track(&self, id: &TrackId) -> Result<()>;

    /// Move a track to the front of the recently played list
    fn record_recently_played(&self, id: &TrackId) -> Result<()>;

    /// Recently played track IDs, most recent first
    fn recently_played(&self) -> Result<Vec<TrackId>>;

    /// Toggle a track's favorite flag, returning the new state
    fn toggle_favorite(&self, id: &TrackId) -> Result<bool>;

    /// Whether a track is a favorite
    fn is_favorite(&self, id: &TrackId) -> Result<bool>;

    /// Favorite track IDs in the order they were marked
    fn favorites(&self) -> Result<Vec<TrackId>>;
}
