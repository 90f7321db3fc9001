//! Property-based tests for the queue engine
//!
//! Uses proptest to verify queue invariants across random inputs.

use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use tonearm_core::{Track, TrackId};
use tonearm_playback::{PlaybackConfig, QueueEngine, QueueStep, RandomShuffler, RepeatMode};

// ===== Helpers =====

fn tracks(len: usize) -> Vec<Track> {
    (0..len)
        .map(|i| Track::new(format!("Track {}", i), PathBuf::from(format!("/music/{}.mp3", i))))
        .collect()
}

fn ids(queue: &QueueEngine) -> Vec<TrackId> {
    queue.tracks().map(|t| t.id.clone()).collect()
}

fn repeat_mode() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::Off),
        Just(RepeatMode::All),
        Just(RepeatMode::One),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous(f64),
    Ended,
    Shuffle(bool),
    CycleRepeat,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        (0.0f64..10.0).prop_map(Op::Previous),
        Just(Op::Ended),
        any::<bool>().prop_map(Op::Shuffle),
        Just(Op::CycleRepeat),
    ]
}

fn engine(seed: u64, repeat: RepeatMode) -> QueueEngine {
    let config = PlaybackConfig {
        repeat,
        ..PlaybackConfig::default()
    };
    QueueEngine::with_shuffler(&config, RandomShuffler::with_seed(seed))
}

// ===== Property Tests =====

proptest! {
    /// Property: shuffle on then off restores the loaded order and keeps the playing track
    #[test]
    fn shuffle_round_trip(len in 1usize..60, start in any::<prop::sample::Index>(), seed in any::<u64>()) {
        let list = tracks(len);
        let original: Vec<TrackId> = list.iter().map(|t| t.id.clone()).collect();
        let start = list[start.index(len)].clone();

        let mut queue = engine(seed, RepeatMode::Off);
        queue.load(list, &start);

        queue.set_shuffle(true);
        prop_assert_eq!(&queue.current_track().unwrap().id, &start.id);

        let shuffled: HashSet<TrackId> = ids(&queue).into_iter().collect();
        prop_assert_eq!(shuffled.len(), len);

        queue.set_shuffle(false);
        prop_assert_eq!(ids(&queue), original);
        prop_assert_eq!(&queue.current_track().unwrap().id, &start.id);
    }

    /// Property: repeat one never moves the index on track end
    #[test]
    fn repeat_one_pins_index(len in 1usize..30, start in any::<prop::sample::Index>(), ends in 1usize..20) {
        let list = tracks(len);
        let start = list[start.index(len)].clone();
        let mut queue = engine(0, RepeatMode::One);
        queue.load(list, &start);
        let before = queue.current_index();

        for _ in 0..ends {
            prop_assert_eq!(queue.on_track_ended(), QueueStep::Restart);
            prop_assert_eq!(queue.current_index(), before);
        }
    }

    /// Property: any operation sequence keeps the index in bounds and the track set intact
    #[test]
    fn operations_preserve_invariants(
        len in 1usize..25,
        repeat in repeat_mode(),
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let list = tracks(len);
        let expected: HashSet<TrackId> = list.iter().map(|t| t.id.clone()).collect();
        let start = list[0].clone();
        let mut queue = engine(seed, repeat);
        queue.load(list, &start);

        for op in ops {
            let playing = queue.current_track().map(|t| t.id.clone());
            let step = match op {
                Op::Next => queue.next(),
                Op::Previous(t) => queue.previous(t),
                Op::Ended => queue.on_track_ended(),
                Op::Shuffle(on) => {
                    queue.set_shuffle(on);
                    prop_assert_eq!(queue.current_track().map(|t| t.id.clone()), playing);
                    QueueStep::Stay
                }
                Op::CycleRepeat => {
                    queue.cycle_repeat();
                    QueueStep::Stay
                }
            };

            if let QueueStep::Play(index) = step {
                prop_assert_eq!(queue.current_index(), Some(index));
            }

            let current = queue.current_index();
            prop_assert!(current.is_some_and(|i| i < queue.len()));
            let present: HashSet<TrackId> = ids(&queue).into_iter().collect();
            prop_assert_eq!(&present, &expected);
        }
    }

    /// Property: removing tracks keeps the index valid until the queue empties
    #[test]
    fn removal_keeps_index_valid(
        len in 1usize..20,
        seed in any::<u64>(),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 1..25),
    ) {
        let list = tracks(len);
        let start = list[len / 2].clone();
        let mut queue = engine(seed, RepeatMode::Off);
        queue.load(list, &start);
        queue.set_shuffle(true);

        for pick in removals {
            if queue.is_empty() {
                break;
            }
            let victim = queue.get(pick.index(queue.len())).unwrap().id.clone();
            prop_assert!(queue.remove_track(&victim));
            prop_assert!(queue.position_of(&victim).is_none());
            prop_assert_eq!(queue.original_order().len(), queue.len());

            match queue.current_index() {
                Some(i) => prop_assert!(i < queue.len()),
                None => prop_assert!(queue.is_empty()),
            }
        }
    }
}
