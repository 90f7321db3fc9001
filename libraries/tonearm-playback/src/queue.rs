//! Playback queue engine
//!
//! The queue keeps one canonical track list in the order it was loaded and
//! an active order that is a permutation of indices into it:
//!
//! ```text
//! tracks:  [A, B, C, D]      (never reordered)
//! order:   [2, 0, 3, 1]      (C, A, D, B while shuffled)
//! current: Some(1)           (A is playing)
//! ```
//!
//! Shuffling only rebuilds `order`; turning it off resets `order` to the
//! identity. Both sequences always hold the same set of tracks.

use crate::shuffle::{is_permutation, RandomShuffler, Shuffler};
use crate::types::{PlaybackConfig, QueueStep, QueueView, RepeatMode};
use std::fmt;
use tonearm_core::{Track, TrackId};
use tracing::{debug, warn};

/// Queue with shuffle and repeat handling
pub struct QueueEngine {
    /// Canonical order, as loaded
    tracks: Vec<Track>,

    /// Active order as indices into `tracks`
    order: Vec<usize>,

    /// Position in `order` of the current track
    current: Option<usize>,

    repeat: RepeatMode,
    shuffle: bool,
    restart_threshold_secs: f64,
    shuffler: Box<dyn Shuffler>,
}

impl fmt::Debug for QueueEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueEngine")
            .field("len", &self.tracks.len())
            .field("order", &self.order)
            .field("current", &self.current)
            .field("repeat", &self.repeat)
            .field("shuffle", &self.shuffle)
            .finish_non_exhaustive()
    }
}

impl Default for QueueEngine {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

impl QueueEngine {
    /// Create an empty queue with a random shuffler
    pub fn new(config: &PlaybackConfig) -> Self {
        Self::with_shuffler(config, RandomShuffler::new())
    }

    /// Create an empty queue using a custom permutation source
    pub fn with_shuffler(config: &PlaybackConfig, shuffler: impl Shuffler + 'static) -> Self {
        Self {
            tracks: Vec::new(),
            order: Vec::new(),
            current: None,
            repeat: config.repeat,
            shuffle: config.shuffle,
            restart_threshold_secs: config.restart_threshold_secs,
            shuffler: Box::new(shuffler),
        }
    }

    // ===== Loading =====

    /// Replace the queue and make `start` the current track
    ///
    /// The active order is a fresh permutation when shuffle is on. If
    /// `start` is not part of `tracks`, the queue becomes just `[start]`.
    /// An empty list clears the queue.
    pub fn load(&mut self, tracks: Vec<Track>, start: &Track) {
        if tracks.is_empty() {
            self.clear();
            return;
        }

        self.tracks = tracks;
        let start_index = match self.tracks.iter().position(|t| t.id == start.id) {
            Some(index) => index,
            None => {
                debug!(track_id = %start.id, "Start track not in source, queueing it alone");
                self.tracks = vec![start.clone()];
                0
            }
        };

        self.order = self.build_order();
        self.current = self.order.iter().position(|&i| i == start_index);

        debug!(
            len = self.tracks.len(),
            shuffle = self.shuffle,
            current = ?self.current,
            "Queue loaded"
        );
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.order.clear();
        self.current = None;
    }

    /// Make a queued track current without reordering
    ///
    /// Returns `false` if the track is not queued.
    pub fn select(&mut self, id: &TrackId) -> bool {
        match self.position_of(id) {
            Some(position) => {
                self.current = Some(position);
                true
            }
            None => false,
        }
    }

    // ===== Navigation =====

    /// Advance to the next track
    ///
    /// At the end of the queue this wraps under [`RepeatMode::All`] and
    /// otherwise returns [`QueueStep::Stop`] with the index unchanged.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> QueueStep {
        let Some(current) = self.current else {
            return QueueStep::Stay;
        };

        let target = current + 1;
        if target < self.order.len() {
            self.current = Some(target);
            QueueStep::Play(target)
        } else if self.repeat == RepeatMode::All {
            self.current = Some(0);
            QueueStep::Play(0)
        } else {
            QueueStep::Stop
        }
    }

    /// Go back one track, or restart the current one
    ///
    /// Past the restart threshold this is a restart gesture and the queue
    /// does not move. At the start of the queue it wraps to the last track
    /// only under [`RepeatMode::All`].
    pub fn previous(&mut self, current_time_secs: f64) -> QueueStep {
        let Some(current) = self.current else {
            return QueueStep::Stay;
        };

        if current_time_secs > self.restart_threshold_secs {
            return QueueStep::Restart;
        }

        if let Some(target) = current.checked_sub(1) {
            self.current = Some(target);
            QueueStep::Play(target)
        } else if self.repeat == RepeatMode::All {
            let last = self.order.len() - 1;
            self.current = Some(last);
            QueueStep::Play(last)
        } else {
            QueueStep::Stay
        }
    }

    /// Decide what follows the end of the current track
    ///
    /// Under [`RepeatMode::One`] the same track restarts and the index never
    /// changes. Otherwise this is [`QueueEngine::next`].
    pub fn on_track_ended(&mut self) -> QueueStep {
        if self.current.is_none() {
            return QueueStep::Stay;
        }
        if self.repeat == RepeatMode::One {
            return QueueStep::Restart;
        }
        self.next()
    }

    // ===== Modes =====

    /// Turn shuffle on or off, keeping the current track
    ///
    /// Turning it on draws a fresh permutation of the whole queue; turning it
    /// off restores the loaded order. Setting the current value is a no-op.
    pub fn set_shuffle(&mut self, on: bool) {
        if self.shuffle == on {
            return;
        }
        self.shuffle = on;

        let playing = self.current_arena_index();
        self.order = self.build_order();
        self.current = playing.and_then(|index| self.order.iter().position(|&i| i == index));

        debug!(shuffle = on, current = ?self.current, "Shuffle changed");
    }

    /// Set the repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Advance the repeat mode (`none -> all -> one -> none`)
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.repeat
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Whether shuffle is on
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Threshold used by [`QueueEngine::previous`]
    pub fn restart_threshold_secs(&self) -> f64 {
        self.restart_threshold_secs
    }

    // ===== Reconciliation =====

    /// Drop a track from the queue
    ///
    /// If it was the current track, the track that moves into its position
    /// becomes current (the new last track when it was last). Returns
    /// `false` if the track was not queued.
    pub fn remove_track(&mut self, id: &TrackId) -> bool {
        let Some(arena_index) = self.tracks.iter().position(|t| &t.id == id) else {
            return false;
        };
        let Some(position) = self.order.iter().position(|&i| i == arena_index) else {
            return false;
        };

        self.tracks.remove(arena_index);
        self.order.remove(position);
        for index in &mut self.order {
            if *index > arena_index {
                *index -= 1;
            }
        }

        self.current = match self.current {
            _ if self.order.is_empty() => None,
            Some(current) if current > position => Some(current - 1),
            Some(current) => Some(current.min(self.order.len() - 1)),
            None => None,
        };

        debug!(track_id = %id, len = self.tracks.len(), "Track removed from queue");
        true
    }

    /// Replace a queued track's record with an edited copy
    ///
    /// Returns `false` if no queued track has the same ID.
    pub fn update_track(&mut self, track: Track) -> bool {
        match self.tracks.iter_mut().find(|t| t.id == track.id) {
            Some(slot) => {
                *slot = track;
                true
            }
            None => false,
        }
    }

    // ===== Queries =====

    /// Position of the current track in the active order
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Track at the current position
    pub fn current_track(&self) -> Option<&Track> {
        self.current_arena_index().map(|i| &self.tracks[i])
    }

    /// Track at a position of the active order
    pub fn get(&self, position: usize) -> Option<&Track> {
        self.order.get(position).map(|&i| &self.tracks[i])
    }

    /// Tracks in active order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.order.iter().map(|&i| &self.tracks[i])
    }

    /// Tracks in the order they were loaded
    pub fn original_order(&self) -> &[Track] {
        &self.tracks
    }

    /// Position of a track in the active order
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.order.iter().position(|&i| &self.tracks[i].id == id)
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Owned snapshot for rendering
    pub fn view(&self) -> QueueView {
        QueueView {
            tracks: self.tracks().cloned().collect(),
            current_index: self.current,
        }
    }

    fn current_arena_index(&self) -> Option<usize> {
        self.current.and_then(|position| self.order.get(position).copied())
    }

    fn build_order(&mut self) -> Vec<usize> {
        let len = self.tracks.len();
        if !self.shuffle {
            return (0..len).collect();
        }

        let order = self.shuffler.permute(len);
        if is_permutation(&order, len) {
            order
        } else {
            warn!(len, "Shuffler returned an invalid permutation, keeping loaded order");
            (0..len).collect()
        }
    }
}
