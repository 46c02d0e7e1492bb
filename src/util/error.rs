//! Error types for tracematch.

use thiserror::Error;

/// Result alias for tracematch operations.
pub type TraceMatchResult<T> = std::result::Result<T, TraceMatchError>;

/// Errors that can occur when comparing trace profiles.
#[derive(Debug, Error, PartialEq)]
pub enum TraceMatchError {
    /// A configuration field is missing or malformed.
    #[error("invalid config `{field}`: {reason}")]
    Config {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A window length of zero was requested.
    #[error("window length must be positive")]
    EmptyWindow,
    /// A window does not fit inside a trace.
    #[error("window of length {window} does not fit a trace of {len} samples")]
    WindowTooLong {
        /// Requested window length.
        window: usize,
        /// Length of the trace it was applied to.
        len: usize,
    },
    /// The shift leash lies outside (0, 1].
    #[error("max shift fraction not in (0,1]: {value}")]
    ShiftFractionOutOfRange {
        /// The rejected fraction.
        value: f64,
    },
    /// Trimming would consume the whole trace.
    #[error("cannot trim {trim} samples from each end of a trace of {len} samples")]
    TrimTooLarge {
        /// Samples to drop from each end.
        trim: usize,
        /// Length of the trace before trimming.
        len: usize,
    },
    /// A computed correlation left the valid interval.
    #[error("correlation not in [-1,1]: {value}")]
    CorrelationOutOfRange {
        /// The offending correlation value.
        value: f64,
    },
    /// The search produced no valid window pair.
    #[error("no window pair located: loc1={loc1}, loc2={loc2}")]
    NoWindowLocated {
        /// Candidate location in the first trace (negative when unset).
        loc1: i64,
        /// Candidate location in the second trace (negative when unset).
        loc2: i64,
    },
    /// Both sub-ranges of an exclusion sampler's domain are empty.
    #[error("empty sample space: [{a},{b}] u [{c},{d}]")]
    EmptySampleSpace {
        /// Lower bound of the first sub-range.
        a: i64,
        /// Upper bound of the first sub-range.
        b: i64,
        /// Lower bound of the second sub-range.
        c: i64,
        /// Upper bound of the second sub-range.
        d: i64,
    },
    /// A validation sampler could not place a single window.
    #[error("validation window did not fit outside the search window")]
    ValidationWindowDidNotFit,
    /// The rank statistic needs at least two pooled samples.
    #[error("too few samples for the rank statistic: n={n}, m={m}")]
    InsufficientSamples {
        /// Size of the first sample.
        n: usize,
        /// Size of the second sample.
        m: usize,
    },
    /// Reading a trace file failed.
    #[error("trace io: {reason}")]
    TraceIo {
        /// Description of the underlying failure.
        reason: String,
    },
}
