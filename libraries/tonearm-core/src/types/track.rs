/// Track domain type
use super::{CoverArt, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Artist shown when a file carries no artist tag
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album shown when a file carries no album tag
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Audio track in the library catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Duration in seconds, 0 when it could not be determined
    pub duration_secs: f64,

    /// Locator handed to the audio backend
    pub source: PathBuf,

    /// Embedded cover image
    pub cover_art: Option<CoverArt>,

    /// Release year, kept as text because tag versions format it differently
    pub year: Option<String>,

    /// Genre
    pub genre: Option<String>,

    /// Track number
    pub track_number: Option<u32>,

    /// When the track was added to the library
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(title: impl Into<String>, source: PathBuf) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_secs: 0.0,
            source,
            cover_art: None,
            year: None,
            genre: None,
            track_number: None,
            added_at: Utc::now(),
        }
    }

    /// Build a catalog track from parsed metadata
    ///
    /// Assigns a fresh identifier and `added_at`. A missing, negative, or
    /// non-finite duration becomes 0.
    pub fn from_metadata(metadata: TrackMetadata, source: PathBuf) -> Self {
        Self {
            id: TrackId::generate(),
            title: metadata.title,
            artist: metadata.artist,
            album: metadata.album,
            duration_secs: sanitize_duration(metadata.duration_secs),
            source,
            cover_art: metadata.cover_art,
            year: metadata.year,
            genre: metadata.genre,
            track_number: metadata.track_number,
            added_at: Utc::now(),
        }
    }

    /// Whether the duration is known
    pub fn has_duration(&self) -> bool {
        self.duration_secs > 0.0
    }
}

fn sanitize_duration(duration: Option<f64>) -> f64 {
    match duration {
        Some(secs) if secs.is_finite() && secs > 0.0 => secs,
        _ => 0.0,
    }
}

/// Track metadata extracted from file tags
///
/// `title`, `artist` and `album` always carry a displayable value; the
/// optional fields stay `None` when the tag does not contain them, which is
/// distinct from a tag frame that decoded to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Track title (defaults to the file name without extension)
    pub title: String,

    /// Artist name (defaults to `Unknown Artist`)
    pub artist: String,

    /// Album name (defaults to `Unknown Album`)
    pub album: String,

    /// Release year
    pub year: Option<String>,

    /// Genre
    pub genre: Option<String>,

    /// Track number
    pub track_number: Option<u32>,

    /// Embedded picture
    pub cover_art: Option<CoverArt>,

    /// Duration in seconds, resolved outside the tag
    pub duration_secs: Option<f64>,
}

impl TrackMetadata {
    /// Defaults derived from a file name
    pub fn from_file_name(file_name: &str) -> Self {
        Self {
            title: title_from_file_name(file_name),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            year: None,
            genre: None,
            track_number: None,
            cover_art: None,
            duration_secs: None,
        }
    }
}

fn title_from_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    match path.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// Partial update for a stored track
///
/// `None` leaves the field untouched. For the optional text fields an empty
/// string clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackUpdate {
    /// New title
    pub title: Option<String>,

    /// New artist
    pub artist: Option<String>,

    /// New album
    pub album: Option<String>,

    /// New year (empty clears)
    pub year: Option<String>,

    /// New genre (empty clears)
    pub genre: Option<String>,

    /// New track number
    pub track_number: Option<u32>,
}

impl TrackUpdate {
    /// Apply this update to a track in place
    pub fn apply(&self, track: &mut Track) {
        if let Some(title) = &self.title {
            track.title.clone_from(title);
        }
        if let Some(artist) = &self.artist {
            track.artist.clone_from(artist);
        }
        if let Some(album) = &self.album {
            track.album.clone_from(album);
        }
        if let Some(year) = &self.year {
            track.year = non_empty(year);
        }
        if let Some(genre) = &self.genre {
            track.genre = non_empty(genre);
        }
        if let Some(number) = self.track_number {
            track.track_number = Some(number);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
