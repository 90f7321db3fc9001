//! JSON views of parsed metadata and imported tracks
//!
//! Cover images are summarized instead of dumped.

use serde::Serialize;
use std::path::PathBuf;
use tonearm_core::{CoverArt, Track, TrackMetadata};
use tonearm_importer::ImportSummary;

#[derive(Debug, Serialize)]
pub struct CoverSummary {
    pub mime_type: String,
    pub picture_type: u8,
    pub description: String,
    pub size: usize,
}

impl From<&CoverArt> for CoverSummary {
    fn from(art: &CoverArt) -> Self {
        Self {
            mime_type: art.mime_type.clone(),
            picture_type: art.picture_type,
            description: art.description.clone(),
            size: art.len(),
        }
    }
}

/// Output of `tonearm tags`
#[derive(Debug, Serialize)]
pub struct TagReport {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub track_number: Option<u32>,
    pub duration_secs: Option<f64>,
    pub cover_art: Option<CoverSummary>,
}

impl TagReport {
    pub fn new(path: PathBuf, metadata: &TrackMetadata) -> Self {
        Self {
            path,
            title: metadata.title.clone(),
            artist: metadata.artist.clone(),
            album: metadata.album.clone(),
            year: metadata.year.clone(),
            genre: metadata.genre.clone(),
            track_number: metadata.track_number,
            duration_secs: metadata.duration_secs,
            cover_art: metadata.cover_art.as_ref().map(CoverSummary::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrackReport {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: f64,
    pub source: PathBuf,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub track_number: Option<u32>,
    pub cover_art: Option<CoverSummary>,
}

impl From<&Track> for TrackReport {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            duration_secs: track.duration_secs,
            source: track.source.clone(),
            year: track.year.clone(),
            genre: track.genre.clone(),
            track_number: track.track_number,
            cover_art: track.cover_art.as_ref().map(CoverSummary::from),
        }
    }
}

/// Output of `tonearm scan`
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub summary: ImportSummary,
    pub tracks: Vec<TrackReport>,
}
