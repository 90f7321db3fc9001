//! Tonearm - Playback
//!
//! Queue management and playback orchestration, independent of any audio
//! output. This crate provides:
//! - [`QueueEngine`]: loaded order plus an active permutation, with shuffle
//!   and repeat (Off, All, One)
//! - [`PlaybackSession`]: drives an [`AudioBackend`](tonearm_core::AudioBackend)
//!   from the queue and reacts to its events
//!
//! # Example: Queue navigation
//!
//! ```rust
//! use std::path::PathBuf;
//! use tonearm_core::Track;
//! use tonearm_playback::{PlaybackConfig, QueueEngine, QueueStep, RepeatMode};
//!
//! let tracks: Vec<Track> = ["A", "B", "C"]
//!     .iter()
//!     .map(|t| Track::new(*t, PathBuf::from(format!("/music/{t}.mp3"))))
//!     .collect();
//! let last = tracks[2].clone();
//!
//! let mut queue = QueueEngine::new(&PlaybackConfig::default());
//! queue.load(tracks, &last);
//!
//! // End of the queue without repeat: stop, index unchanged
//! assert_eq!(queue.next(), QueueStep::Stop);
//!
//! queue.set_repeat(RepeatMode::All);
//! assert_eq!(queue.next(), QueueStep::Play(0));
//! ```

mod error;
mod queue;
mod session;
mod shuffle;
pub mod types;

pub use error::{PlaybackError, Result};
pub use queue::QueueEngine;
pub use session::PlaybackSession;
pub use shuffle::{RandomShuffler, Shuffler};
pub use types::{
    PlaybackConfig, PlaybackState, QueueStep, QueueView, RepeatMode,
    DEFAULT_RESTART_THRESHOLD_SECS,
};
