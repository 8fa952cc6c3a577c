//! # RandomNumberGenerator
//!
//! Every selection strategy draws its randomness from an explicitly passed
//! `RandomNumberGenerator`. There is no global or thread-local state, so a
//! seeded generator makes a whole selection call reproducible.
//!
//! ## Example
//!
//! ```rust
//! use genselect::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let random_numbers = rng.fetch_uniform(0.0, 1.0, 5);
//!
//! for number in random_numbers {
//!     assert!((0.0..1.0).contains(&number));
//! }
//! ```

use rand::{
    rngs::StdRng,
    seq::{index, SliceRandom},
    Rng, SeedableRng,
};
use std::collections::VecDeque;

use crate::error::{Result, SelectionError};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws
/// selection strategies need.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible selection runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a specified number of random floating-point numbers within the given range.
    ///
    /// # Parameters
    ///
    /// - `from`: The lower bound of the range (inclusive).
    /// - `to`: The upper bound of the range (exclusive).
    /// - `num`: The number of random numbers to generate.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> VecDeque<f64> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.rng.gen_range(from..to)));
        uniform_numbers
    }

    /// Draws a uniform number in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws a uniform index in `0..len`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::RandomGeneration` if `len` is zero.
    pub fn index(&mut self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(SelectionError::RandomGeneration(
                "Cannot draw an index from an empty range".to_string(),
            ));
        }
        Ok(self.rng.gen_range(0..len))
    }

    /// Shuffles `items` in place with a uniformly random permutation.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Draws two distinct positions uniformly from `0..len`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::RandomGeneration` if `len` is less than two.
    pub fn pick_two_distinct(&mut self, len: usize) -> Result<(usize, usize)> {
        if len < 2 {
            return Err(SelectionError::RandomGeneration(format!(
                "Cannot draw two distinct positions from {} element(s)",
                len
            )));
        }
        let picked = index::sample(&mut self.rng, len, 2);
        Ok((picked.index(0), picked.index(1)))
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
