//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG with 64-bit state. Same seed → same sequence,
//! which keeps generated customer streams reproducible across runs and
//! platforms.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use checkout_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(2024);
/// let offset = rng.range(0, 3600); // [0, 3600)
/// assert!((0..3600).contains(&offset));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced by 1 (xorshift never leaves the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate random index in [0, bound)
    ///
    /// # Panics
    /// Panics if bound == 0
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be positive");
        (self.next() % bound as u64) as usize
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        // Top 53 bits scaled by 2^-53
        (self.next() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Current internal state, usable as a seed to resume the sequence
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
