//! Audio backend events
//!
//! The backend runs its own timing and decoding and reports back only through
//! events. Events form a closed set and are delivered through typed channels:
//! a backend embeds an [`EventHub`], and every consumer holds an
//! [`EventSubscription`] that unsubscribes when dropped.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

/// Events emitted by an audio backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BackendEvent {
    /// Playback started or resumed
    Play,

    /// Playback paused
    Pause,

    /// Playback position advanced (seconds)
    TimeUpdate(f64),

    /// The loaded source played to its end
    Ended,

    /// Source metadata became available (duration in seconds)
    MetadataLoaded(f64),
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Sender<BackendEvent>)>,
}

/// Listener registry embedded by backend implementations
///
/// Cloning the hub shares the same registry, so a backend can hand a clone to
/// its timing thread and emit from there.
#[derive(Debug, Clone, Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
}

impl EventHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener
    pub fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = unbounded();
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, tx));

        EventSubscription {
            id,
            receiver: rx,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every live listener
    ///
    /// Listeners whose receiving side is gone are pruned. Returns the number
    /// of listeners the event was delivered to.
    pub fn emit(&self, event: BackendEvent) -> usize {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.listeners.retain(|(_, tx)| tx.send(event).is_ok());
        registry.listeners.len()
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}

/// Handle for one listener registered on an [`EventHub`]
///
/// Events queue up in arrival order until taken. Dropping the handle (or
/// calling [`EventSubscription::unsubscribe`]) removes the listener.
#[derive(Debug)]
pub struct EventSubscription {
    id: u64,
    receiver: Receiver<BackendEvent>,
    registry: Weak<Mutex<Registry>>,
}

impl EventSubscription {
    /// Take the next queued event without blocking
    pub fn try_next(&self) -> Option<BackendEvent> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event
    pub fn next_timeout(&self, timeout: Duration) -> Option<BackendEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Explicitly remove this listener from its hub
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
