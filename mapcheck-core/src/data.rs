//! Core data types: generation budgets, size ranges, and random sources.

use std::fmt;

use crate::error::{MapcheckError, Result};

/// Size budget for controlling generated-value complexity.
///
/// For container generators the budget is an approximate upper bound on
/// element count; an explicit [`SizeRange`] on the generator overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Clamp size to a maximum value.
    pub fn clamp(&self, max: usize) -> Self {
        Size(self.0.min(max))
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// An inclusive element-count range configured on a container generator.
///
/// Validated at construction: `min` must not exceed `max`. Bounds are
/// unsigned, so a negative bound is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    min: usize,
    max: usize,
}

impl SizeRange {
    /// Create a validated inclusive range.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(MapcheckError::InvalidSizeRange { min, max });
        }
        Ok(SizeRange { min, max })
    }

    /// An exact size: `[n, n]`.
    pub fn exactly(n: usize) -> Self {
        SizeRange { min: n, max: n }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Whether a container of `len` entries satisfies this range.
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }

    /// Draw a uniform target count from the range.
    pub fn sample(&self, source: &mut Source) -> usize {
        source.next_usize(self.min, self.max)
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Splittable random seed for deterministic generation.
///
/// Seeds can be split to create independent random streams,
/// ensuring deterministic and reproducible runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    /// Uses SplitMix64 algorithm for high-quality randomness.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a random seed from OS entropy.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed(rng.gen(), rng.gen())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// A mutable source of randomness for one generation or shrink call.
///
/// Wraps a [`Seed`] and advances it per draw. The number of draws taken is
/// observable via [`Source::draws`], so tests can assert that randomness
/// consumption is deterministic for a given seed. A `Source` must not be
/// shared between concurrent callers mid-call; the `&mut` receiver enforces
/// single ownership for the duration of each engine call.
#[derive(Debug, Clone)]
pub struct Source {
    seed: Seed,
    draws: u64,
}

impl Source {
    /// Create a source from an explicit seed.
    pub fn new(seed: Seed) -> Self {
        Source { seed, draws: 0 }
    }

    /// Create a source from a bare integer seed.
    pub fn from_u64(value: u64) -> Self {
        Source::new(Seed::from_u64(value))
    }

    /// Draw the next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let (value, seed) = self.seed.next_u64();
        self.seed = seed;
        self.draws += 1;
        value
    }

    /// Draw a uniform value in `[0, bound)`. A zero bound yields zero
    /// without consuming a draw.
    pub fn next_bounded(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let value = self.next_u64();
        (value as u128 * bound as u128 >> 64) as u64
    }

    /// Draw a uniform integer in the inclusive range `[min, max]`.
    pub fn next_usize(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        if min == max {
            return min;
        }
        let span = (max - min) as u64 + 1;
        min + self.next_bounded(span) as usize
    }

    /// Draw a uniform boolean.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    /// Number of raw draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Ensure gamma is odd for maximal period
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
