//! Per-window moment tables for a fixed window length.
//!
//! The shift scan needs the sum and a variance proxy of every window of a
//! trace. The first window is summed directly; each subsequent window is
//! derived in O(1) by retiring the outgoing sample and admitting the incoming
//! one, with wide integer accumulators.

use crate::trace::Trace;
use crate::util::{TraceMatchError, TraceMatchResult};

/// Cached moments of one window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowMoments {
    /// Sum of the samples in the window.
    pub sum: i64,
    /// Variance proxy `w * Σv² - (Σv)²`, i.e. w² times the biased variance.
    pub var_proxy: f64,
}

impl WindowMoments {
    fn from_sums(window: usize, sum: i64, sum_sq: i64) -> Self {
        let sq = (sum as i128 * sum as i128) as f64;
        Self {
            sum,
            var_proxy: window as f64 * sum_sq as f64 - sq,
        }
    }
}

/// Moments for every valid window start position of a trace.
#[derive(Clone, Debug)]
pub struct WindowTable {
    window: usize,
    moments: Vec<WindowMoments>,
}

impl WindowTable {
    /// Builds the table for all `trace.len() - window + 1` start positions.
    ///
    /// Fails when `window` is zero or longer than the trace.
    pub fn build(trace: &Trace, window: usize) -> TraceMatchResult<Self> {
        if window == 0 {
            return Err(TraceMatchError::EmptyWindow);
        }
        let samples = trace.samples();
        let len = samples.len();
        if window > len {
            return Err(TraceMatchError::WindowTooLong { window, len });
        }

        let positions = len - window + 1;
        let mut moments = Vec::with_capacity(positions);

        let mut sum: i64 = 0;
        let mut sum_sq: i64 = 0;
        for &v in &samples[..window] {
            let v = v as i64;
            sum += v;
            sum_sq += v * v;
        }
        moments.push(WindowMoments::from_sums(window, sum, sum_sq));

        for start in 1..positions {
            let old = samples[start - 1] as i64;
            let next = samples[start + window - 1] as i64;
            sum += next - old;
            sum_sq += next * next - old * old;
            moments.push(WindowMoments::from_sums(window, sum, sum_sq));
        }

        Ok(Self { window, moments })
    }

    /// The fixed window length the table was built for.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of window start positions.
    pub fn len(&self) -> usize {
        self.moments.len()
    }

    /// True when the table holds no positions.
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// Moments of the window starting at `start`.
    pub fn at(&self, start: usize) -> WindowMoments {
        self.moments[start]
    }

    /// All cached moments, indexed by start position.
    pub fn moments(&self) -> &[WindowMoments] {
        &self.moments
    }
}
