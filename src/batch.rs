//! Batch comparison of every unordered pair of traces.
//!
//! Each pair is an independent task with its own derived [`RandomSource`],
//! so the sequential and `rayon`-parallel drivers produce identical records
//! for the same base seed.

use crate::compare::{compare, CompareConfig, Comparison};
use crate::random::RandomSource;
use crate::trace::Trace;
use crate::util::TraceMatchResult;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A labelled trace ready for batch comparison.
#[derive(Clone, Debug)]
pub struct LabelledTrace {
    /// Display name, typically the source file name.
    pub label: String,
    /// The trace itself.
    pub trace: Trace,
}

/// Outcome of one batch pair.
#[derive(Clone, Debug)]
pub struct PairRecord {
    /// Label of the first trace.
    pub label1: String,
    /// Label of the second trace.
    pub label2: String,
    /// The comparison outcome.
    pub comparison: Comparison,
}

fn pair_indices(count: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..count {
        for j in i + 1..count {
            pairs.push((i, j));
        }
    }
    pairs
}

fn run_pair(
    traces: &[LabelledTrace],
    config: &CompareConfig,
    seed: u64,
    task: usize,
    i: usize,
    j: usize,
) -> TraceMatchResult<PairRecord> {
    let mut rng = RandomSource::for_task(seed, task as u64);
    let comparison = compare(&traces[i].trace, &traces[j].trace, config, &mut rng)?;
    Ok(PairRecord {
        label1: traces[i].label.clone(),
        label2: traces[j].label.clone(),
        comparison,
    })
}

/// Compares every unordered pair of `traces` sequentially.
pub fn compare_all_pairs(
    traces: &[LabelledTrace],
    config: &CompareConfig,
    seed: u64,
) -> TraceMatchResult<Vec<PairRecord>> {
    config.validate()?;
    pair_indices(traces.len())
        .into_iter()
        .enumerate()
        .map(|(task, (i, j))| run_pair(traces, config, seed, task, i, j))
        .collect()
}

/// Compares every unordered pair of `traces` across threads.
///
/// Pair ordering and per-pair seeding match the sequential driver.
#[cfg(feature = "rayon")]
pub fn compare_all_pairs_par(
    traces: &[LabelledTrace],
    config: &CompareConfig,
    seed: u64,
) -> TraceMatchResult<Vec<PairRecord>> {
    config.validate()?;
    pair_indices(traces.len())
        .into_par_iter()
        .enumerate()
        .map(|(task, (i, j))| run_pair(traces, config, seed, task, i, j))
        .collect()
}
