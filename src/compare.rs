//! One full trace-pair comparison: search, then repeated validation.

use crate::random::RandomSource;
use crate::search::{max_correlation, CorrelationLocation};
use crate::trace::Trace;
use crate::util::{TraceMatchError, TraceMatchResult};
use crate::validate::{validate_location, ValidationResult};

/// Parameters of a comparison run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompareConfig {
    /// Window length used by the maximum-correlation search.
    pub search_window: usize,
    /// Window length of the validation samples.
    pub validation_window: usize,
    /// Rigid-pair correlations drawn per repetition.
    pub rigid_pairs: usize,
    /// Random-pair correlations drawn per repetition.
    pub random_pairs: usize,
    /// Leash on the search shift, in (0, 1].
    pub max_shift_fraction: f64,
    /// Number of T1 repetitions to aggregate.
    pub repetitions: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            search_window: 300,
            validation_window: 50,
            rigid_pairs: 50,
            random_pairs: 50,
            max_shift_fraction: 1.0,
            repetitions: 200,
        }
    }
}

impl CompareConfig {
    /// Checks every field against its domain.
    pub fn validate(&self) -> TraceMatchResult<()> {
        if self.search_window == 0 {
            return Err(TraceMatchError::Config {
                field: "search_window",
                reason: "must be positive".into(),
            });
        }
        if self.validation_window == 0 {
            return Err(TraceMatchError::Config {
                field: "validation_window",
                reason: "must be positive".into(),
            });
        }
        if !(self.max_shift_fraction > 0.0 && self.max_shift_fraction <= 1.0) {
            return Err(TraceMatchError::Config {
                field: "max_shift_fraction",
                reason: format!("{} not in (0,1]", self.max_shift_fraction),
            });
        }
        if self.repetitions == 0 {
            return Err(TraceMatchError::Config {
                field: "repetitions",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Outcome of one trace-pair comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    /// Best window alignment found by the search.
    pub location: CorrelationLocation,
    /// Aggregated T1 validation statistics at that alignment.
    pub validation: ValidationResult,
}

/// Compares two traces: locates the best alignment, then validates it.
///
/// All randomness flows through `rng`; the search itself draws nothing, so a
/// fixed seed reproduces the full comparison bit for bit.
pub fn compare(
    trace1: &Trace,
    trace2: &Trace,
    config: &CompareConfig,
    rng: &mut RandomSource,
) -> TraceMatchResult<Comparison> {
    config.validate()?;

    let location = max_correlation(
        trace1,
        trace2,
        config.search_window,
        config.max_shift_fraction,
    )?;
    let validation = validate_location(
        trace1,
        trace2,
        &location,
        config.search_window,
        config.rigid_pairs,
        config.random_pairs,
        config.validation_window,
        config.repetitions,
        rng,
    )?;

    Ok(Comparison {
        location,
        validation,
    })
}
