//! Trace profiles: integer-scaled depth samples along a toolmark cross-section.

use crate::util::{TraceMatchError, TraceMatchResult};

/// An immutable one-dimensional profile of integer depth samples.
///
/// Samples carry the profilometer scaling: each is the raw floating depth
/// multiplied by 100 and rounded to the nearest integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    samples: Vec<i32>,
}

impl Trace {
    /// Wraps already-scaled integer samples.
    pub fn new(samples: Vec<i32>) -> Self {
        Self { samples }
    }

    /// Scales raw floating depth samples to trace integers.
    ///
    /// Each value becomes `int(100 * v + 0.5)` with a truncating cast, the
    /// exact conversion the profilometer PIP format uses.
    pub fn from_depths(depths: &[f64]) -> Self {
        let samples = depths.iter().map(|&v| (100.0 * v + 0.5) as i32).collect();
        Self { samples }
    }

    /// Number of samples in the trace.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the trace holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The scaled samples.
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Returns a copy with `trim` samples dropped from each end.
    ///
    /// The ends of a scanned profile carry edge artifacts; comparisons run on
    /// the interior.
    pub fn trimmed(&self, trim: usize) -> TraceMatchResult<Self> {
        let len = self.samples.len();
        if 2 * trim >= len {
            return Err(TraceMatchError::TrimTooLarge { trim, len });
        }
        Ok(Self {
            samples: self.samples[trim..len - trim].to_vec(),
        })
    }
}

impl From<Vec<i32>> for Trace {
    fn from(samples: Vec<i32>) -> Self {
        Self::new(samples)
    }
}
