//! Validation-window correlation samplers.
//!
//! After a match is located, correlation distributions are built from windows
//! drawn near the matched location. Offsets come from an exclusion domain
//! that skips the search-window band, so validation windows never overlap the
//! region that produced the match. Rigid pairs share one offset across both
//! traces; random pairs draw independent offsets per trace.

use crate::corr::correlation;
use crate::random::{RandomSource, SplitRangeSampler};
use crate::search::CorrelationLocation;
use crate::trace::Trace;
use crate::util::TraceMatchResult;

/// Draws `pairs` rigid-pair correlations around the matched location.
///
/// One offset `i` is drawn per pair from
/// `[-min(loc1,loc2), -window] ∪ [searchWindow, min(len1-loc1, len2-loc2) - window]`
/// and applied to both locations, preserving the matched relative shift.
/// Returns an empty set when the domain is entirely degenerate; that is the
/// caller's signal, not an error here.
pub fn rigid_pair_correlations(
    trace1: &Trace,
    trace2: &Trace,
    location: &CorrelationLocation,
    search_window: usize,
    pairs: usize,
    window: usize,
    rng: &mut RandomSource,
) -> TraceMatchResult<Vec<f64>> {
    let l1 = location.loc1 as i64;
    let l2 = location.loc2 as i64;
    let w = window as i64;
    let sw = search_window as i64;

    let lower = -l1.min(l2);
    let upper = (trace1.len() as i64 - l1).min(trace2.len() as i64 - l2) - w;

    // No room on the left of the match and none on the right either.
    if lower > -w && upper < sw {
        return Ok(Vec::new());
    }

    let offsets = SplitRangeSampler::new(lower, -w, sw, upper)?;
    let samples1 = trace1.samples();
    let samples2 = trace2.samples();
    let mut result = Vec::with_capacity(pairs);
    for _ in 0..pairs {
        let i = offsets.draw(rng);
        let start1 = (l1 + i) as usize;
        let start2 = (l2 + i) as usize;
        result.push(correlation(
            &samples1[start1..start1 + window],
            &samples2[start2..start2 + window],
        ));
    }
    Ok(result)
}

/// Draws `pairs` random-pair correlations around the matched location.
///
/// Each trace gets its own exclusion domain relative to its own matched
/// location, and each pair draws the two offsets independently (first trace
/// first). Returns an empty set when either trace's domain is degenerate.
pub fn random_pair_correlations(
    trace1: &Trace,
    trace2: &Trace,
    location: &CorrelationLocation,
    search_window: usize,
    pairs: usize,
    window: usize,
    rng: &mut RandomSource,
) -> TraceMatchResult<Vec<f64>> {
    let l1 = location.loc1 as i64;
    let l2 = location.loc2 as i64;
    let w = window as i64;
    let sw = search_window as i64;

    let left_ub = -w;
    let right_lb = sw;
    let lower1 = -l1;
    let upper1 = trace1.len() as i64 - l1 - w;
    let lower2 = -l2;
    let upper2 = trace2.len() as i64 - l2 - w;

    if (lower1 > left_ub && right_lb > upper1) || (lower2 > left_ub && right_lb > upper2) {
        return Ok(Vec::new());
    }

    let offsets1 = SplitRangeSampler::new(lower1, left_ub, right_lb, upper1)?;
    let offsets2 = SplitRangeSampler::new(lower2, left_ub, right_lb, upper2)?;
    let samples1 = trace1.samples();
    let samples2 = trace2.samples();
    let mut result = Vec::with_capacity(pairs);
    for _ in 0..pairs {
        let shift1 = offsets1.draw(rng);
        let shift2 = offsets2.draw(rng);
        let start1 = (l1 + shift1) as usize;
        let start2 = (l2 + shift2) as usize;
        result.push(correlation(
            &samples1[start1..start1 + window],
            &samples2[start2..start2 + window],
        ));
    }
    Ok(result)
}
