//! Conover's T1 rank statistic and the repeated validation loop.
//!
//! T1 compares the rigid-pair correlation sample against the random-pair
//! sample: it grows as the rigid sample shifts to the right of the random
//! one, which is the signature of a genuine match. The statistic is
//! approximately standard normal under the null.

use crate::random::RandomSource;
use crate::sample::{random_pair_correlations, rigid_pair_correlations};
use crate::search::CorrelationLocation;
use crate::telemetry::{trace_event, trace_span};
use crate::trace::Trace;
use crate::util::{TraceMatchError, TraceMatchResult};

/// Aggregated validation outcome over repeated T1 draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationResult {
    /// Mean of the collected T1 values.
    pub mean_t: f64,
    /// Sample variance of the collected T1 values (n-1 denominator).
    pub var_t: f64,
    /// Number of T1 values collected.
    pub sample_size: usize,
}

/// Which pooled sample a ranked value came from.
#[derive(Clone, Copy, PartialEq)]
enum SampleTag {
    First,
    Second,
}

/// Sum of ranks assigned to the first sample and the tie-aware sum of
/// squared ranks over the pool, with midrank tie handling.
fn rank_sums(x: &[f64], y: &[f64]) -> (f64, f64) {
    let mut pooled: Vec<(f64, SampleTag)> = Vec::with_capacity(x.len() + y.len());
    pooled.extend(x.iter().map(|&v| (v, SampleTag::First)));
    pooled.extend(y.iter().map(|&v| (v, SampleTag::Second)));
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let size = pooled.len();
    let mut rank_sum_first = 0.0;
    let mut sq_rank_sum = 0.0;

    let mut i = 0;
    while i < size {
        let value = pooled[i].0;
        let mut group = 1usize;
        let mut first_count = usize::from(pooled[i].1 == SampleTag::First);
        while i + group < size && pooled[i + group].0 == value {
            first_count += usize::from(pooled[i + group].1 == SampleTag::First);
            group += 1;
        }

        // Ranks i+1 .. i+group share the group's average rank.
        let sum_of_ranks = (group * (2 * i + 1 + group) / 2) as f64;
        let average_rank = sum_of_ranks / group as f64;
        rank_sum_first += average_rank * first_count as f64;
        sq_rank_sum += group as f64 * average_rank * average_rank;
        i += group;
    }
    (rank_sum_first, sq_rank_sum)
}

/// Conover's T1 statistic for samples `x` and `y`.
///
/// Requires at least two pooled values. T1 increases as `x` shifts to the
/// right of `y`.
pub fn t1_statistic(x: &[f64], y: &[f64]) -> TraceMatchResult<f64> {
    let n = x.len();
    let m = y.len();
    if n + m < 2 {
        return Err(TraceMatchError::InsufficientSamples { n, m });
    }

    let (t, r2) = rank_sums(x, y);
    let n = n as f64;
    let m = m as f64;
    let big_n = n + m;
    let n1 = big_n + 1.0;
    let top = t - n * n1 / 2.0;
    // Rank sum exactly at its null expectation: no separation, T1 is zero.
    // This covers the fully-tied pool, whose scale term is also zero.
    if top == 0.0 {
        return Ok(0.0);
    }
    let bot2 = n * m / (big_n * (big_n - 1.0)) * r2 - n * m * n1 * n1 / (4.0 * (big_n - 1.0));
    Ok(top / bot2.sqrt())
}

/// Mean and sample variance (n-1 denominator) of `v`.
pub fn mean_and_var(v: &[f64]) -> (f64, f64) {
    let n = v.len() as f64;
    let mean = v.iter().sum::<f64>() / n;
    let sum_sq: f64 = v.iter().map(|&value| (value - mean) * (value - mean)).sum();
    (mean, sum_sq / (n - 1.0))
}

/// Runs the repeated rigid/random sampling loop at a fixed location.
///
/// Each repetition draws a fresh rigid and random sample set and computes one
/// T1 value. An empty sample set fails the whole comparison; the validation
/// window must fit outside the search-window band in both traces.
#[allow(clippy::too_many_arguments)]
pub fn validate_location(
    trace1: &Trace,
    trace2: &Trace,
    location: &CorrelationLocation,
    search_window: usize,
    rigid_pairs: usize,
    random_pairs: usize,
    validation_window: usize,
    repetitions: usize,
    rng: &mut RandomSource,
) -> TraceMatchResult<ValidationResult> {
    let _span = trace_span!("validate_location", repetitions = repetitions).entered();

    let mut t_values = Vec::with_capacity(repetitions);
    for _ in 0..repetitions {
        let rigid = rigid_pair_correlations(
            trace1,
            trace2,
            location,
            search_window,
            rigid_pairs,
            validation_window,
            rng,
        )?;
        if rigid.is_empty() {
            return Err(TraceMatchError::ValidationWindowDidNotFit);
        }

        let random = random_pair_correlations(
            trace1,
            trace2,
            location,
            search_window,
            random_pairs,
            validation_window,
            rng,
        )?;
        if random.is_empty() {
            return Err(TraceMatchError::ValidationWindowDidNotFit);
        }

        t_values.push(t1_statistic(&rigid, &random)?);
    }

    let (mean_t, var_t) = mean_and_var(&t_values);
    trace_event!("validation_done", mean_t = mean_t, var_t = var_t);
    Ok(ValidationResult {
        mean_t,
        var_t,
        sample_size: repetitions,
    })
}

#[cfg(test)]
mod tests {
    use super::{mean_and_var, rank_sums, t1_statistic};
    use crate::util::TraceMatchError;

    #[test]
    fn rank_sums_use_midranks_for_ties() {
        // Pool: 1,1,1,5,5,5 -> tie groups with average ranks 2 and 5.
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 1.0, 1.0];
        let (t, r2) = rank_sums(&x, &y);
        assert_eq!(t, 15.0);
        assert_eq!(r2, 3.0 * 4.0 + 3.0 * 25.0);
    }

    #[test]
    fn t1_is_finite_and_positive_for_shifted_tied_samples() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 1.0, 1.0];
        let t1 = t1_statistic(&x, &y).unwrap();
        assert!(t1.is_finite());
        assert!(t1 > 0.0);
    }

    #[test]
    fn t1_is_zero_for_identical_samples() {
        let x = [0.1, 0.4, 0.7, 0.9];
        let y = [0.9, 0.1, 0.7, 0.4];
        let t1 = t1_statistic(&x, &y).unwrap();
        assert!(t1.abs() < 1e-12);
    }

    #[test]
    fn t1_is_zero_when_the_whole_pool_ties() {
        let x = [1.0, 1.0, 1.0];
        let y = [1.0, 1.0];
        assert_eq!(t1_statistic(&x, &y).unwrap(), 0.0);
    }

    #[test]
    fn t1_is_antisymmetric_in_its_arguments() {
        let x = [0.2, 0.5, 0.8, 0.3];
        let y = [0.1, 0.4, 0.6];
        let forward = t1_statistic(&x, &y).unwrap();
        let backward = t1_statistic(&y, &x).unwrap();
        assert!((forward + backward).abs() < 1e-12);
    }

    #[test]
    fn t1_matches_hand_computation_without_ties() {
        // x = [3, 5], y = [1, 2, 4]: ranks of x are 3 and 5, T = 8.
        let x = [3.0, 5.0];
        let y = [1.0, 2.0, 4.0];
        let (t, r2) = rank_sums(&x, &y);
        assert_eq!(t, 8.0);
        assert_eq!(r2, 55.0);
        let expected = {
            let top = 8.0 - 2.0 * 6.0 / 2.0;
            let bot2 = 2.0 * 3.0 / (5.0 * 4.0) * 55.0 - 2.0 * 3.0 * 36.0 / (4.0 * 4.0);
            top / f64::sqrt(bot2)
        };
        assert_eq!(t1_statistic(&x, &y).unwrap(), expected);
    }

    #[test]
    fn t1_requires_two_pooled_samples() {
        let err = t1_statistic(&[1.0], &[]).err().unwrap();
        assert_eq!(err, TraceMatchError::InsufficientSamples { n: 1, m: 0 });
    }

    #[test]
    fn mean_and_var_use_the_sample_denominator() {
        let (mean, var) = mean_and_var(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(mean, 2.5);
        assert!((var - 5.0 / 3.0).abs() < 1e-12);
    }
}
