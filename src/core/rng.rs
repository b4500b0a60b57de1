//! Deterministic, forkable randomness.
//!
//! Every random draw in a match (shuffles, random targets, simulated turn
//! decisions, node tokens) goes through a [`GameRng`]. A search seeded with
//! the same value replays the same rollouts.
//!
//! ```
//! use ccg_mcts::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.fork().gen_u128(), b.fork().gen_u128());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// ChaCha8-backed RNG with deterministic forking.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Derive an independent stream. Successive forks of the same parent
    /// differ from each other; the same fork index of the same seed repeats.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15))
            ^ self.inner.gen::<u64>();
        Self::new(fork_seed)
    }

    /// Named stream derived from the seed only.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = rustc_hash::FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// 128 random bits, used for node tokens.
    pub fn gen_u128(&mut self) -> u128 {
        self.inner.gen()
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Shuffle a persistent vector in place.
    pub fn shuffle_vector<T: Clone>(&mut self, vector: &mut im::Vector<T>) {
        let mut items: Vec<T> = vector.iter().cloned().collect();
        self.shuffle(&mut items);
        *vector = items.into_iter().collect();
    }

    /// Uniform pick from a slice.
    #[must_use]
    pub fn choose<T: Copy>(&mut self, slice: &[T]) -> Option<T> {
        if slice.is_empty() {
            None
        } else {
            Some(slice[self.gen_index(slice.len())])
        }
    }
}
