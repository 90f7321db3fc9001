//! In-memory library store
//!
//! Reference implementation of [`LibraryStore`] used by the CLI and by tests.
//! Nothing is persisted.

use crate::error::{CoreError, Result};
use crate::traits::LibraryStore;
use crate::types::{Track, TrackId, TrackUpdate};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Maximum length of the recently played list
pub const RECENTLY_PLAYED_LIMIT: usize = 50;

#[derive(Debug, Default)]
struct LibraryState {
    tracks: Vec<Track>,
    recently_played: Vec<TrackId>,
    favorites: Vec<TrackId>,
}

/// Thread-safe in-memory catalog
#[derive(Debug, Default)]
pub struct MemoryLibrary {
    state: RwLock<LibraryState>,
}

impl MemoryLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library pre-populated with tracks
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            state: RwLock::new(LibraryState {
                tracks,
                ..LibraryState::default()
            }),
        }
    }

    /// Number of tracks in the catalog
    pub fn len(&self) -> usize {
        self.read().tracks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.read().tracks.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, LibraryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LibraryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LibraryStore for MemoryLibrary {
    fn add_track(&self, track: Track) -> Result<()> {
        let mut state = self.write();
        if state.tracks.iter().any(|t| t.id == track.id) {
            return Err(CoreError::Duplicate(track.id.to_string()));
        }
        debug!(track_id = %track.id, title = %track.title, "Track added");
        state.tracks.push(track);
        Ok(())
    }

    fn get_track(&self, id: &TrackId) -> Result<Option<Track>> {
        Ok(self.read().tracks.iter().find(|t| &t.id == id).cloned())
    }

    fn tracks(&self) -> Result<Vec<Track>> {
        Ok(self.read().tracks.clone())
    }

    fn update_track(&self, id: &TrackId, update: &TrackUpdate) -> Result<Track> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CoreError::invalid_input("track title cannot be empty"));
        }

        let mut state = self.write();
        let track = state
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::TrackNotFound(id.clone()))?;
        update.apply(track);
        debug!(track_id = %id, "Track updated");
        Ok(track.clone())
    }

    fn remove_track(&self, id: &TrackId) -> Result<()> {
        let mut state = self.write();
        let before = state.tracks.len();
        state.tracks.retain(|t| &t.id != id);
        if state.tracks.len() == before {
            return Err(CoreError::TrackNotFound(id.clone()));
        }
        state.recently_played.retain(|r| r != id);
        state.favorites.retain(|f| f != id);
        debug!(track_id = %id, "Track removed");
        Ok(())
    }

    fn record_recently_played(&self, id: &TrackId) -> Result<()> {
        let mut state = self.write();
        state.recently_played.retain(|r| r != id);
        state.recently_played.insert(0, id.clone());
        state.recently_played.truncate(RECENTLY_PLAYED_LIMIT);
        Ok(())
    }

    fn recently_played(&self) -> Result<Vec<TrackId>> {
        Ok(self.read().recently_played.clone())
    }

    fn toggle_favorite(&self, id: &TrackId) -> Result<bool> {
        let mut state = self.write();
        if let Some(pos) = state.favorites.iter().position(|f| f == id) {
            state.favorites.remove(pos);
            debug!(track_id = %id, "Removed from favorites");
            Ok(false)
        } else {
            state.favorites.push(id.clone());
            debug!(track_id = %id, "Added to favorites");
            Ok(true)
        }
    }

    fn is_favorite(&self, id: &TrackId) -> Result<bool> {
        Ok(self.read().favorites.contains(id))
    }

    fn favorites(&self) -> Result<Vec<TrackId>> {
        Ok(self.read().favorites.clone())
    }
}
