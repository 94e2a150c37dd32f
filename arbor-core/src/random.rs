//! Stateful pseudo-random source for deterministic generation.

use std::fmt;

/// A forkable pseudo-random source built on SplitMix64.
///
/// Every draw advances the internal state in place, so one instance is a
/// single-writer sequential stream: the same logical choice is never drawn
/// twice. Independent sub-streams are obtained with [`Random::split`], which
/// derives a decoupled child from the current state while advancing the
/// parent by exactly one step.
///
/// `Clone` copies the state verbatim. A clone replays the same stream, which
/// is how determinism is asserted in tests; it is not a fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random {
    state: u64,
    gamma: u64,
}

impl Random {
    /// Create a source from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        let state = mix64(seed);
        let gamma = mix_gamma(state);
        Random { state, gamma }
    }

    /// Create a source seeded from the OS entropy pool.
    pub fn from_entropy() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Random::from_seed(rng.gen())
    }

    /// Draw the next raw 64-bit value, advancing the state.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(self.gamma);
        mix64(self.state)
    }

    /// Draw a value in `[0, bound)`. `bound` must be non-zero.
    pub fn next_bounded(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "next_bounded requires a non-zero bound");
        let value = self.next_u64();
        (value as u128 * bound as u128 >> 64) as u64
    }

    /// Draw a boolean.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    /// Fork an independent sub-stream.
    ///
    /// The child's future draws are deterministic given the parent's state at
    /// the fork point but do not perturb the parent, whose own state advances
    /// by exactly one step.
    pub fn split(&mut self) -> Random {
        let output = self.next_u64();
        Random {
            state: output,
            gamma: mix_gamma(output),
        }
    }
}

impl fmt::Display for Random {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Random({}, {})", self.state, self.gamma)
    }
}

/// SplitMix64 mixing function for high-quality output.
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a gamma value for stream splitting.
fn mix_gamma(z: u64) -> u64 {
    // Gamma must be odd for maximal period
    (mix64(z) | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
