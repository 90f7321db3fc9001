//! Integration tests for the queue engine
//!
//! Covers navigation, repeat, and shuffle scenarios end to end.

use std::path::PathBuf;
use tonearm_core::{Track, TrackId};
use tonearm_playback::{
    PlaybackConfig, QueueEngine, QueueStep, RandomShuffler, RepeatMode, Shuffler,
};

// ===== Test Helpers =====

fn track(title: &str) -> Track {
    Track::new(title, PathBuf::from(format!("/music/{}.mp3", title)))
}

fn abc() -> Vec<Track> {
    vec![track("A"), track("B"), track("C")]
}

fn titles(queue: &QueueEngine) -> Vec<String> {
    queue.tracks().map(|t| t.title.clone()).collect()
}

fn current_title(queue: &QueueEngine) -> String {
    queue.current_track().map(|t| t.title.clone()).unwrap_or_default()
}

/// Always returns the same permutation
struct FixedShuffler(Vec<usize>);

impl Shuffler for FixedShuffler {
    fn permute(&mut self, len: usize) -> Vec<usize> {
        assert_eq!(len, self.0.len(), "fixed permutation used on wrong length");
        self.0.clone()
    }
}

fn loaded(tracks: Vec<Track>, start: usize, repeat: RepeatMode) -> QueueEngine {
    let start = tracks[start].clone();
    let config = PlaybackConfig {
        repeat,
        ..PlaybackConfig::default()
    };
    let mut queue = QueueEngine::new(&config);
    queue.load(tracks, &start);
    queue
}

// ===== Next =====

#[test]
fn next_walks_forward() {
    let mut queue = loaded(abc(), 0, RepeatMode::Off);

    assert_eq!(queue.next(), QueueStep::Play(1));
    assert_eq!(current_title(&queue), "B");
    assert_eq!(queue.next(), QueueStep::Play(2));
    assert_eq!(current_title(&queue), "C");
}

#[test]
fn next_at_end_without_repeat_stops() {
    let mut queue = loaded(abc(), 2, RepeatMode::Off);

    assert_eq!(queue.next(), QueueStep::Stop);
    assert_eq!(queue.current_index(), Some(2));

    // Stays stopped on repeated calls
    assert_eq!(queue.next(), QueueStep::Stop);
    assert_eq!(queue.current_index(), Some(2));
}

#[test]
fn next_at_end_with_repeat_all_wraps() {
    let mut queue = loaded(abc(), 2, RepeatMode::All);

    assert_eq!(queue.next(), QueueStep::Play(0));
    assert_eq!(queue.current_index(), Some(0));
    assert_eq!(current_title(&queue), "A");
}

#[test]
fn explicit_next_under_repeat_one_still_advances() {
    let mut queue = loaded(abc(), 0, RepeatMode::One);
    assert_eq!(queue.next(), QueueStep::Play(1));

    let mut queue = loaded(abc(), 2, RepeatMode::One);
    assert_eq!(queue.next(), QueueStep::Stop);
}

// ===== Previous =====

#[test]
fn previous_restart_fires_before_wrap() {
    let mut queue = loaded(abc(), 0, RepeatMode::All);

    // Well into the track: restart, index unchanged
    assert_eq!(queue.previous(10.0), QueueStep::Restart);
    assert_eq!(queue.current_index(), Some(0));

    // Near the start: wrap to the last track
    assert_eq!(queue.previous(1.0), QueueStep::Play(2));
    assert_eq!(queue.current_index(), Some(2));
    assert_eq!(current_title(&queue), "C");
}

#[test]
fn previous_steps_back() {
    let mut queue = loaded(abc(), 2, RepeatMode::Off);

    assert_eq!(queue.previous(0.5), QueueStep::Play(1));
    assert_eq!(queue.previous(0.0), QueueStep::Play(0));
    assert_eq!(queue.previous(0.0), QueueStep::Stay);
    assert_eq!(current_title(&queue), "A");
}

// ===== Track Ended =====

#[test]
fn ended_under_repeat_one_never_moves() {
    let mut queue = loaded(abc(), 1, RepeatMode::One);

    for _ in 0..5 {
        assert_eq!(queue.on_track_ended(), QueueStep::Restart);
        assert_eq!(queue.current_index(), Some(1));
    }
}

#[test]
fn ended_behaves_like_next_otherwise() {
    let mut queue = loaded(abc(), 1, RepeatMode::Off);
    assert_eq!(queue.on_track_ended(), QueueStep::Play(2));
    assert_eq!(queue.on_track_ended(), QueueStep::Stop);
    assert_eq!(queue.current_index(), Some(2));

    queue.set_repeat(RepeatMode::All);
    assert_eq!(queue.on_track_ended(), QueueStep::Play(0));
}

// ===== Repeat =====

#[test]
fn repeat_cycles_without_touching_queue() {
    let mut queue = loaded(abc(), 1, RepeatMode::Off);

    assert_eq!(queue.cycle_repeat(), RepeatMode::All);
    assert_eq!(queue.cycle_repeat(), RepeatMode::One);
    assert_eq!(queue.cycle_repeat(), RepeatMode::Off);

    assert_eq!(titles(&queue), vec!["A", "B", "C"]);
    assert_eq!(queue.current_index(), Some(1));
}

// ===== Shuffle =====

#[test]
fn fixed_shuffle_relocates_current_track() {
    let tracks = abc();
    let b = tracks[1].clone();
    let mut queue =
        QueueEngine::with_shuffler(&PlaybackConfig::default(), FixedShuffler(vec![2, 0, 1]));

    queue.load(tracks, &b);
    assert_eq!(queue.current_index(), Some(1));

    queue.set_shuffle(true);
    assert_eq!(titles(&queue), vec!["C", "A", "B"]);
    assert_eq!(queue.current_index(), Some(2));
    assert_eq!(queue.current_track().unwrap().id, b.id);
}

#[test]
fn shuffle_round_trip_restores_order_and_track() {
    let tracks: Vec<Track> = (0..20).map(|i| track(&format!("T{}", i))).collect();
    let original: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
    let start = tracks[7].clone();

    let mut queue =
        QueueEngine::with_shuffler(&PlaybackConfig::default(), RandomShuffler::with_seed(7));
    queue.load(tracks, &start);

    queue.set_shuffle(true);
    assert_eq!(queue.current_track().unwrap().id, start.id);
    assert_eq!(queue.len(), 20);

    queue.set_shuffle(false);
    let restored: Vec<TrackId> = queue.tracks().map(|t| t.id.clone()).collect();
    assert_eq!(restored, original);
    assert_eq!(queue.current_track().unwrap().id, start.id);
    assert_eq!(queue.current_index(), Some(7));
}

#[test]
fn shuffle_never_mutates_loaded_order() {
    let tracks = abc();
    let start = tracks[0].clone();
    let mut queue =
        QueueEngine::with_shuffler(&PlaybackConfig::default(), FixedShuffler(vec![1, 2, 0]));
    queue.load(tracks, &start);

    queue.set_shuffle(true);

    let original: Vec<&str> = queue.original_order().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(original, vec!["A", "B", "C"]);
    assert_eq!(titles(&queue), vec!["B", "C", "A"]);
}

#[test]
fn setting_same_shuffle_value_keeps_order() {
    let tracks = abc();
    let start = tracks[0].clone();
    let mut queue = QueueEngine::with_shuffler(&PlaybackConfig::default(), RandomShuffler::new());
    queue.load(tracks, &start);

    queue.set_shuffle(true);
    let first = titles(&queue);
    queue.set_shuffle(true);
    assert_eq!(titles(&queue), first);
}

#[test]
fn navigation_follows_shuffled_order() {
    let tracks = abc();
    let c = tracks[2].clone();
    let mut queue =
        QueueEngine::with_shuffler(&PlaybackConfig::default(), FixedShuffler(vec![2, 0, 1]));
    queue.load(tracks, &c);
    queue.set_shuffle(true);
    assert_eq!(queue.current_index(), Some(0));

    assert_eq!(queue.next(), QueueStep::Play(1));
    assert_eq!(current_title(&queue), "A");
    assert_eq!(queue.next(), QueueStep::Play(2));
    assert_eq!(current_title(&queue), "B");
    assert_eq!(queue.next(), QueueStep::Stop);
}

// ===== Stale Tracks =====

#[test]
fn unreconciled_queue_keeps_stale_entries() {
    let tracks = abc();
    let start = tracks[1].clone();
    let mut queue = QueueEngine::new(&PlaybackConfig::default());
    queue.load(tracks, &start);

    // Nothing tells the queue a track left the library
    assert_eq!(queue.current_index(), Some(1));
    assert_eq!(queue.next(), QueueStep::Play(2));
    assert_eq!(queue.len(), 3);
}
