//! Maximum-correlation search over two trace profiles.
//!
//! The search runs the leashed shift scan twice, once per trace in the
//! "first" role, and keeps the greater signed squared correlation. Ties keep
//! the first scan's result. The winner is reported on the correlation scale.

pub(crate) mod scan;

use crate::corr::signed_root;
use crate::search::scan::scan_shifts;
use crate::telemetry::{trace_event, trace_span};
use crate::trace::Trace;
use crate::util::{TraceMatchError, TraceMatchResult};
use crate::window::WindowTable;

/// Location and strength of the best window alignment between two traces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationLocation {
    /// Start of the matched window in the first trace.
    pub loc1: usize,
    /// Start of the matched window in the second trace.
    pub loc2: usize,
    /// Pearson correlation of the matched windows, in [-1, 1].
    pub correlation: f64,
    /// Whether the second trace was reversed for this match.
    ///
    /// Reversed matching is not performed; the flag is carried for output
    /// compatibility and is always `false`.
    pub flipped: bool,
}

impl CorrelationLocation {
    /// Validates and builds a location record.
    ///
    /// Fails when the correlation leaves [-1, 1] or either location is
    /// negative (the scan's "nothing tracked" sentinel).
    pub fn new(correlation: f64, loc1: i64, loc2: i64) -> TraceMatchResult<Self> {
        if !(-1.0..=1.0).contains(&correlation) {
            return Err(TraceMatchError::CorrelationOutOfRange { value: correlation });
        }
        if loc1 < 0 || loc2 < 0 {
            return Err(TraceMatchError::NoWindowLocated { loc1, loc2 });
        }
        Ok(Self {
            loc1: loc1 as usize,
            loc2: loc2 as usize,
            correlation,
            flipped: false,
        })
    }
}

/// Finds the window pair with maximal signed squared Pearson correlation.
///
/// `window` must fit in both traces and `max_shift_fraction` must lie in
/// (0, 1]. The fraction caps the shift `loc2 - loc1` each scan may reach, at
/// `max_shift_fraction * (len - window)` of the trace playing the second
/// role; the cap keeps the match away from degenerate end-against-end
/// alignments. The second scan starts at shift 1 so the shared zero-shift
/// diagonal is not evaluated twice.
pub fn max_correlation(
    trace1: &Trace,
    trace2: &Trace,
    window: usize,
    max_shift_fraction: f64,
) -> TraceMatchResult<CorrelationLocation> {
    if window == 0 {
        return Err(TraceMatchError::EmptyWindow);
    }
    for trace in [trace1, trace2] {
        if window > trace.len() {
            return Err(TraceMatchError::WindowTooLong {
                window,
                len: trace.len(),
            });
        }
    }
    if !(max_shift_fraction > 0.0 && max_shift_fraction <= 1.0) {
        return Err(TraceMatchError::ShiftFractionOutOfRange {
            value: max_shift_fraction,
        });
    }

    let _span = trace_span!(
        "max_correlation",
        len1 = trace1.len(),
        len2 = trace2.len(),
        window = window
    )
    .entered();

    let table1 = WindowTable::build(trace1, window)?;
    let table2 = WindowTable::build(trace2, window)?;

    let forward = scan_shifts(
        trace1.samples(),
        trace2.samples(),
        &table1,
        &table2,
        window,
        0,
        max_shift_fraction,
        -2.0,
    );
    let reverse = scan_shifts(
        trace2.samples(),
        trace1.samples(),
        &table2,
        &table1,
        window,
        1,
        max_shift_fraction,
        forward.sq_cor,
    );

    let best = if reverse.sq_cor > forward.sq_cor {
        reverse.transposed()
    } else {
        forward
    };

    let location = CorrelationLocation::new(signed_root(best.sq_cor), best.loc1, best.loc2)?;
    trace_event!(
        "match_located",
        loc1 = location.loc1,
        loc2 = location.loc2,
        correlation = location.correlation
    );
    Ok(location)
}
