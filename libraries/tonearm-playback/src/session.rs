//! Playback session
//!
//! Ties the queue engine to an audio backend and the library store. The
//! session is the only component that commands the backend. Commands update
//! local state optimistically; backend events arriving later correct it.

use crate::error::{PlaybackError, Result};
use crate::queue::QueueEngine;
use crate::shuffle::Shuffler;
use crate::types::{PlaybackConfig, PlaybackState, QueueStep, QueueView, RepeatMode};
use std::sync::Arc;
use tonearm_core::{
    AudioBackend, BackendEvent, EventSubscription, LibraryStore, Track, TrackId, TrackUpdate,
};
use tracing::{debug, info, warn};

/// One playback session over a backend and a library store
///
/// Backend events are queued on an internal subscription and handled one at
/// a time, each to completion, by [`PlaybackSession::process_pending_events`].
pub struct PlaybackSession<B: AudioBackend, S: LibraryStore> {
    backend: B,
    store: Arc<S>,
    queue: QueueEngine,
    events: EventSubscription,

    is_playing: bool,
    current_time_secs: f64,
    duration_secs: f64,
    volume: f32,
}

impl<B: AudioBackend, S: LibraryStore> PlaybackSession<B, S> {
    /// Create a session with a random shuffler
    pub fn new(backend: B, store: Arc<S>, config: &PlaybackConfig) -> Result<Self> {
        let queue = QueueEngine::new(config);
        Self::with_queue(backend, store, config, queue)
    }

    /// Create a session whose queue uses a custom permutation source
    pub fn with_shuffler(
        backend: B,
        store: Arc<S>,
        config: &PlaybackConfig,
        shuffler: impl Shuffler + 'static,
    ) -> Result<Self> {
        let queue = QueueEngine::with_shuffler(config, shuffler);
        Self::with_queue(backend, store, config, queue)
    }

    fn with_queue(
        mut backend: B,
        store: Arc<S>,
        config: &PlaybackConfig,
        queue: QueueEngine,
    ) -> Result<Self> {
        let events = backend.subscribe();
        let volume = clamp_volume(config.volume).unwrap_or(1.0);
        backend
            .set_volume(volume)
            .map_err(|e| PlaybackError::backend(&e))?;

        Ok(Self {
            backend,
            store,
            queue,
            events,
            is_playing: false,
            current_time_secs: 0.0,
            duration_secs: 0.0,
            volume,
        })
    }

    // ===== Transport =====

    /// Play a track, optionally replacing the queue
    ///
    /// With a non-empty `source`, the queue is reloaded from it. Without one,
    /// the track is selected if already queued, or queued alone otherwise.
    pub fn play_track(&mut self, track: Track, source: Option<Vec<Track>>) -> Result<()> {
        match source {
            Some(tracks) if !tracks.is_empty() => self.queue.load(tracks, &track),
            _ => {
                if !self.queue.select(&track.id) {
                    self.queue.load(vec![track.clone()], &track);
                }
            }
        }

        info!(track_id = %track.id, title = %track.title, "Playing track");
        self.start_current()
    }

    /// Pause if playing, resume otherwise
    ///
    /// No-op when nothing is loaded.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.queue.current_track().is_none() {
            return Ok(());
        }

        if self.is_playing {
            self.pause_backend()
        } else {
            self.play_backend()
        }
    }

    /// Skip to the next track
    ///
    /// At the end of a non-repeating queue playback pauses and holds position.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let step = self.queue.next();
        debug!(?step, "Next");
        match step {
            QueueStep::Play(_) => self.start_current(),
            QueueStep::Stop => self.pause_backend(),
            QueueStep::Restart | QueueStep::Stay => Ok(()),
        }
    }

    /// Go to the previous track, or restart the current one
    pub fn previous(&mut self) -> Result<()> {
        let step = self.queue.previous(self.current_time_secs);
        debug!(?step, current_time = self.current_time_secs, "Previous");
        match step {
            QueueStep::Play(_) => self.start_current(),
            QueueStep::Restart => self.seek(0.0),
            QueueStep::Stop | QueueStep::Stay => Ok(()),
        }
    }

    /// Seek within the current track
    ///
    /// The position is clamped to `[0, duration]` when the duration is known.
    /// Non-finite positions and seeks with nothing loaded are ignored.
    pub fn seek(&mut self, position_secs: f64) -> Result<()> {
        if self.queue.current_track().is_none() || position_secs.is_nan() {
            return Ok(());
        }

        let mut position = position_secs.max(0.0);
        if self.duration_secs > 0.0 {
            position = position.min(self.duration_secs);
        }
        if !position.is_finite() {
            return Ok(());
        }

        self.current_time_secs = position;
        self.backend
            .seek(position)
            .map_err(|e| PlaybackError::backend(&e))
    }

    /// Set the output volume, clamped to `[0, 1]`
    ///
    /// NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        let Some(volume) = clamp_volume(volume) else {
            return Ok(());
        };
        self.volume = volume;
        self.backend
            .set_volume(volume)
            .map_err(|e| PlaybackError::backend(&e))
    }

    /// Advance the repeat mode, returning the new one
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        let mode = self.queue.cycle_repeat();
        debug!(?mode, "Repeat changed");
        mode
    }

    /// Flip shuffle, returning the new state
    pub fn toggle_shuffle(&mut self) -> bool {
        let on = !self.queue.shuffle();
        self.queue.set_shuffle(on);
        on
    }

    // ===== Library =====

    /// Remove a track from the library and the queue
    ///
    /// If the removed track was playing, playback pauses and the track that
    /// took its place in the queue is loaded without starting it.
    pub fn remove_track(&mut self, id: &TrackId) -> Result<()> {
        self.store.remove_track(id)?;

        let was_current = self.queue.current_track().is_some_and(|t| &t.id == id);
        if !self.queue.remove_track(id) || !was_current {
            return Ok(());
        }

        info!(track_id = %id, "Removed the playing track");
        self.pause_backend()?;
        self.current_time_secs = 0.0;
        self.duration_secs = 0.0;
        if self.queue.is_empty() {
            return Ok(());
        }
        self.load_current().map(|_| ())
    }

    /// Edit a track through the store and refresh its queued copy
    pub fn update_track(&mut self, id: &TrackId, update: &TrackUpdate) -> Result<Track> {
        let updated = self.store.update_track(id, update)?;
        self.queue.update_track(updated.clone());
        Ok(updated)
    }

    // ===== Events =====

    /// Handle every event queued by the backend, in arrival order
    ///
    /// Events raised while handling are processed in the same pass. Failures
    /// do not stop the drain; they are returned.
    pub fn process_pending_events(&mut self) -> Vec<PlaybackError> {
        let mut failures = Vec::new();
        while let Some(event) = self.events.try_next() {
            if let Err(err) = self.handle_event(event) {
                warn!(?event, error = %err, "Failed to handle backend event");
                failures.push(err);
            }
        }
        failures
    }

    /// Apply one backend event
    pub fn handle_event(&mut self, event: BackendEvent) -> Result<()> {
        match event {
            BackendEvent::Play => self.is_playing = true,
            BackendEvent::Pause => self.is_playing = false,
            BackendEvent::TimeUpdate(secs) => {
                if secs.is_finite() {
                    self.current_time_secs = secs.max(0.0);
                }
            }
            BackendEvent::MetadataLoaded(secs) => {
                if secs.is_finite() && secs >= 0.0 {
                    self.duration_secs = secs;
                }
            }
            BackendEvent::Ended => return self.on_ended(),
        }
        Ok(())
    }

    fn on_ended(&mut self) -> Result<()> {
        let step = self.queue.on_track_ended();
        debug!(?step, "Track ended");
        match step {
            QueueStep::Restart => {
                self.current_time_secs = 0.0;
                self.backend.seek(0.0).map_err(|e| PlaybackError::backend(&e))?;
                self.play_backend()
            }
            QueueStep::Play(_) => self.start_current(),
            QueueStep::Stop => self.pause_backend(),
            QueueStep::Stay => {
                self.is_playing = false;
                Ok(())
            }
        }
    }

    // ===== State =====

    /// Snapshot of the transport state
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_track: self.queue.current_track().cloned(),
            is_playing: self.is_playing,
            current_time_secs: self.current_time_secs,
            duration_secs: self.duration_secs,
            volume: self.volume,
            repeat: self.queue.repeat(),
            shuffle: self.queue.shuffle(),
        }
    }

    /// Snapshot of the active queue
    pub fn queue(&self) -> QueueView {
        self.queue.view()
    }

    /// Whether playback is believed to be running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Position in the current track, in seconds
    pub fn current_time_secs(&self) -> f64 {
        self.current_time_secs
    }

    /// Output volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Shared library store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Audio backend (read-only)
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Audio backend, for platform setup
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ===== Internals =====

    /// Load the current queue entry and start it
    fn start_current(&mut self) -> Result<()> {
        if self.load_current()? {
            self.play_backend()
        } else {
            Ok(())
        }
    }

    /// Load the current queue entry without starting it
    ///
    /// Returns `false` when the queue has no current track.
    fn load_current(&mut self) -> Result<bool> {
        let Some(track) = self.queue.current_track() else {
            return Ok(false);
        };
        let (id, source, duration) = (track.id.clone(), track.source.clone(), track.duration_secs);

        self.current_time_secs = 0.0;
        self.duration_secs = duration;

        if let Err(err) = self.backend.load_source(&source) {
            self.is_playing = false;
            warn!(track_id = %id, source = %source.display(), error = %err, "Backend failed to load source");
            return Err(PlaybackError::backend(&err));
        }

        if let Err(err) = self.store.record_recently_played(&id) {
            warn!(track_id = %id, error = %err, "Failed to record recently played");
        }

        Ok(true)
    }

    fn play_backend(&mut self) -> Result<()> {
        self.is_playing = true;
        if let Err(err) = self.backend.play() {
            self.is_playing = false;
            warn!(error = %err, "Backend rejected play");
            return Err(PlaybackError::backend(&err));
        }
        Ok(())
    }

    fn pause_backend(&mut self) -> Result<()> {
        self.is_playing = false;
        self.backend.pause().map_err(|e| PlaybackError::backend(&e))
    }
}

fn clamp_volume(volume: f32) -> Option<f32> {
    if volume.is_nan() {
        None
    } else {
        Some(volume.clamp(0.0, 1.0))
    }
}
