//! Deterministic random number generation for deck shuffling.
//!
//! The same seed always produces the same shuffle.
//!
//! ```
//! use cgs_core::core::DeckRng;
//!
//! let mut a: Vec<u32> = (0..10).collect();
//! let mut b = a.clone();
//! DeckRng::new(42).shuffle(&mut a);
//! DeckRng::new(42).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
}

impl DeckRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
