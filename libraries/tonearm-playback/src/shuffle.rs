//! Shuffle algorithms for queue randomization
//!
//! A shuffler only produces index permutations. The queue engine applies
//! them to its canonical track list, so track data is never reordered.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Source of queue permutations
pub trait Shuffler: Send {
    /// Return a permutation of `0..len`
    fn permute(&mut self, len: usize) -> Vec<usize>;
}

/// Uniform random shuffle using Fisher-Yates
///
/// Every ordering of the queue is equally likely.
#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    /// Shuffler seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic shuffler for reproducible orderings
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for RandomShuffler {
    fn permute(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Whether `order` contains every index in `0..len` exactly once
pub(crate) fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
