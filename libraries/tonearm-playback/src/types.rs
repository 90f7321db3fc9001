//! Core types for playback management

use serde::{Deserialize, Serialize};
use tonearm_core::Track;

/// Position past which "previous" restarts the current track instead
pub const DEFAULT_RESTART_THRESHOLD_SECS: f64 = 3.0;

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    #[serde(rename = "none")]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `none -> all -> one -> none` cycle
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// What the caller should do after a queue transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueStep {
    /// Load and play the track now at this index of the active order
    Play(usize),

    /// Seek the current track to 0; the queue did not move
    Restart,

    /// The end of the queue was reached; pause and hold position
    Stop,

    /// Nothing to do
    Stay,
}

/// Configuration for a playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume in `[0, 1]` (default: 1.0)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// See [`DEFAULT_RESTART_THRESHOLD_SECS`]
    pub restart_threshold_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: RepeatMode::Off,
            shuffle: false,
            restart_threshold_secs: DEFAULT_RESTART_THRESHOLD_SECS,
        }
    }
}

/// Snapshot of the session's transport state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Track currently loaded, if any
    pub current_track: Option<Track>,

    /// Whether playback is believed to be running
    pub is_playing: bool,

    /// Position in seconds, reset to 0 on every load
    pub current_time_secs: f64,

    /// Duration of the current track in seconds (0 if unknown)
    pub duration_secs: f64,

    /// Output volume in `[0, 1]`
    pub volume: f32,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Shuffle flag
    pub shuffle: bool,
}

/// Active queue as seen by a view layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueueView {
    /// Tracks in playback order
    pub tracks: Vec<Track>,

    /// Index of the current track in `tracks`
    pub current_index: Option<usize>,
}

impl QueueView {
    /// Track at the current index
    pub fn current(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }
}
