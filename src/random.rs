//! Seedable randomness for the search and validation samplers.
//!
//! Every comparison task owns its own [`RandomSource`]; nothing in the crate
//! touches a shared generator. The draw sequence is part of the observable
//! contract: one integer draw consumes exactly one uniform `f64`, so a fixed
//! seed and a fixed call order reproduce results bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::util::{TraceMatchError, TraceMatchResult};

/// A per-task uniform generator.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Creates a generator from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independently-seeded generator for task `index`.
    ///
    /// Batch runs give every trace pair its own stream; the derivation is a
    /// splitmix64 step over the base seed and the index.
    pub fn for_task(seed: u64, index: u64) -> Self {
        let mut z = seed
            .wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::from_seed(z ^ (z >> 31))
    }

    /// Returns a draw from U[0,1).
    pub fn uniform01(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Returns a uniform integer in `[lower, upper]`.
    ///
    /// Scales a single `uniform01` draw; `lower <= upper` is required.
    pub fn int_in_range(&mut self, lower: i64, upper: i64) -> i64 {
        debug_assert!(lower <= upper);
        let span = (upper - lower + 1) as f64;
        lower + (span * self.uniform01()).floor() as i64
    }
}

/// Uniform integer draws from a union of two disjoint ranges `[a,b] ∪ [c,d]`.
///
/// Either sub-range may be empty (signalled by `b < a` or `d < c`); draws are
/// weighted by sub-range size, never 50/50 between the halves. Used to sample
/// validation offsets while skipping the matched search-window band.
#[derive(Clone, Copy, Debug)]
pub struct SplitRangeSampler {
    a: i64,
    c: i64,
    ab_len: i64,
    len_minus_1: i64,
}

impl SplitRangeSampler {
    /// Builds a sampler over `[a,b] ∪ [c,d]`.
    ///
    /// Fails with [`TraceMatchError::EmptySampleSpace`] only when both
    /// sub-ranges are empty.
    pub fn new(a: i64, b: i64, c: i64, d: i64) -> TraceMatchResult<Self> {
        let ab_len = if a <= b { b - a + 1 } else { 0 };
        let len_minus_1 = if c <= d {
            ab_len + d - c
        } else if ab_len > 0 {
            ab_len - 1
        } else {
            return Err(TraceMatchError::EmptySampleSpace { a, b, c, d });
        };
        Ok(Self {
            a,
            c,
            ab_len,
            len_minus_1,
        })
    }

    /// Draws the next integer from the union.
    pub fn draw(&self, rng: &mut RandomSource) -> i64 {
        let i = rng.int_in_range(0, self.len_minus_1);
        if i < self.ab_len {
            self.a + i
        } else {
            self.c + (i - self.ab_len)
        }
    }
}
