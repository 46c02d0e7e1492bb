use tracematch::{
    compare, compare_all_pairs, max_correlation, validate_location, CompareConfig, LabelledTrace,
    RandomSource, Trace, TraceMatchError,
};

fn synthetic_trace(len: usize, mult: usize, offset: usize) -> Trace {
    Trace::new(
        (0..len)
            .map(|i| (((i * mult + offset) % 251) as i32) - 125)
            .collect(),
    )
}

#[test]
fn identity_ramp_pipeline_completes_with_a_perfect_match() {
    let ramp = Trace::new((0..100).collect());
    let mut rng = RandomSource::from_seed(42);

    let location = max_correlation(&ramp, &ramp, 10, 1.0).unwrap();
    assert_eq!(location.loc1, location.loc2);
    assert_eq!(location.correlation, 1.0);

    let validation =
        validate_location(&ramp, &ramp, &location, 5, 20, 20, 5, 50, &mut rng).unwrap();
    assert!(validation.mean_t.is_finite());
    assert!(validation.var_t >= 0.0);
    assert_eq!(validation.sample_size, 50);
}

#[test]
fn full_comparison_favors_a_genuine_match() {
    // Same mark: the second trace is the first with mild deterministic wear.
    let base = synthetic_trace(400, 89, 13);
    let worn = Trace::new(
        base.samples()
            .iter()
            .enumerate()
            .map(|(i, &v)| v + ((i % 7) as i32) - 3)
            .collect(),
    );
    let config = CompareConfig {
        search_window: 60,
        validation_window: 20,
        rigid_pairs: 25,
        random_pairs: 25,
        max_shift_fraction: 0.5,
        repetitions: 40,
    };
    let mut rng = RandomSource::from_seed(271828);

    let outcome = compare(&base, &worn, &config, &mut rng).unwrap();
    assert!(outcome.location.correlation > 0.9);
    assert!(outcome.validation.mean_t.is_finite());
    assert!(outcome.validation.var_t >= 0.0);
    assert_eq!(outcome.validation.sample_size, 40);
}

#[test]
fn identical_seed_and_call_order_reproduce_bitwise_results() {
    let trace1 = synthetic_trace(300, 97, 31);
    let trace2 = synthetic_trace(320, 103, 57);
    let config = CompareConfig {
        search_window: 40,
        validation_window: 15,
        rigid_pairs: 20,
        random_pairs: 20,
        max_shift_fraction: 0.5,
        repetitions: 30,
    };

    let mut rng1 = RandomSource::from_seed(1337);
    let first = compare(&trace1, &trace2, &config, &mut rng1).unwrap();
    let mut rng2 = RandomSource::from_seed(1337);
    let second = compare(&trace1, &trace2, &config, &mut rng2).unwrap();

    assert_eq!(first.location, second.location);
    assert_eq!(
        first.validation.mean_t.to_bits(),
        second.validation.mean_t.to_bits()
    );
    assert_eq!(
        first.validation.var_t.to_bits(),
        second.validation.var_t.to_bits()
    );
}

#[test]
fn a_cramped_validation_window_fails_the_whole_comparison() {
    let trace = synthetic_trace(80, 61, 9);
    let config = CompareConfig {
        search_window: 70,
        validation_window: 30,
        rigid_pairs: 10,
        random_pairs: 10,
        max_shift_fraction: 1.0,
        repetitions: 5,
    };
    let mut rng = RandomSource::from_seed(8);
    assert_eq!(
        compare(&trace, &trace, &config, &mut rng).err().unwrap(),
        TraceMatchError::ValidationWindowDidNotFit
    );
}

#[test]
fn batch_report_is_stable_across_runs() {
    let traces: Vec<LabelledTrace> = [(113usize, 19usize), (127, 43), (131, 71)]
        .iter()
        .enumerate()
        .map(|(k, &(mult, offset))| LabelledTrace {
            label: format!("mark{k}.txt"),
            trace: synthetic_trace(220, mult, offset),
        })
        .collect();
    let config = CompareConfig {
        search_window: 30,
        validation_window: 12,
        rigid_pairs: 15,
        random_pairs: 15,
        max_shift_fraction: 0.5,
        repetitions: 20,
    };

    let first = compare_all_pairs(&traces, &config, 2024).unwrap();
    let second = compare_all_pairs(&traces, &config, 2024).unwrap();
    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.label1, b.label1);
        assert_eq!(a.label2, b.label2);
        assert_eq!(a.comparison, b.comparison);
    }
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_batch_report_matches_the_sequential_one() {
    let traces: Vec<LabelledTrace> = [(113usize, 19usize), (127, 43), (131, 71), (137, 5)]
        .iter()
        .enumerate()
        .map(|(k, &(mult, offset))| LabelledTrace {
            label: format!("mark{k}.txt"),
            trace: synthetic_trace(220, mult, offset),
        })
        .collect();
    let config = CompareConfig {
        search_window: 30,
        validation_window: 12,
        rigid_pairs: 15,
        random_pairs: 15,
        max_shift_fraction: 0.5,
        repetitions: 20,
    };

    let sequential = compare_all_pairs(&traces, &config, 555).unwrap();
    let parallel = tracematch::compare_all_pairs_par(&traces, &config, 555).unwrap();
    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.iter().zip(parallel.iter()) {
        assert_eq!(a.label1, b.label1);
        assert_eq!(a.comparison, b.comparison);
    }
}
