//! Error types for playback

use thiserror::Error;
use tonearm_core::CoreError;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio backend rejected a command
    ///
    /// Non-fatal: playback is paused and the queue position is kept so the
    /// caller can retry or skip.
    #[error("Audio backend error: {0}")]
    Backend(String),

    /// The library store failed
    #[error("Library error: {0}")]
    Library(#[from] CoreError),
}

impl PlaybackError {
    pub(crate) fn backend(err: &CoreError) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
