//! TraceMatch compares one-dimensional toolmark trace profiles.
//!
//! The crate locates the best-correlated window pair between two integer
//! depth profiles with a leashed shift search, then validates the match by
//! pitting rigid-shift correlation samples against random-shift samples with
//! Conover's T1 rank statistic. Batch drivers compare whole directories of
//! traces, optionally in parallel via the `rayon` feature.

pub mod batch;
mod compare;
mod corr;
#[cfg(feature = "trace-io")]
pub mod io;
mod random;
mod sample;
pub mod search;
pub(crate) mod telemetry;
mod trace;
pub mod util;
mod validate;
mod window;

pub use compare::{compare, CompareConfig, Comparison};
pub use corr::{correlation, signed_sq_correlation};
pub use random::{RandomSource, SplitRangeSampler};
pub use sample::{random_pair_correlations, rigid_pair_correlations};
pub use search::{max_correlation, CorrelationLocation};
pub use trace::Trace;
pub use util::{TraceMatchError, TraceMatchResult};
pub use validate::{mean_and_var, t1_statistic, validate_location, ValidationResult};
pub use window::{WindowMoments, WindowTable};

pub use batch::{compare_all_pairs, LabelledTrace, PairRecord};
#[cfg(feature = "rayon")]
pub use batch::compare_all_pairs_par;
