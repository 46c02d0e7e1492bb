use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tracematch::{
    compare, max_correlation, validate_location, CompareConfig, RandomSource, Trace,
};

fn make_trace(len: usize, mult: usize, offset: usize) -> Trace {
    Trace::new(
        (0..len)
            .map(|i| (((i * mult + offset) % 1009) as i32) - 504)
            .collect(),
    )
}

fn bench_search(c: &mut Criterion) {
    let trace1 = make_trace(2000, 389, 17);
    let trace2 = make_trace(2200, 433, 71);

    c.bench_function("max_correlation_w300", |b| {
        b.iter(|| black_box(max_correlation(&trace1, &trace2, 300, 1.0).unwrap()));
    });

    c.bench_function("max_correlation_w300_leashed", |b| {
        b.iter(|| black_box(max_correlation(&trace1, &trace2, 300, 0.25).unwrap()));
    });
}

fn bench_validation(c: &mut Criterion) {
    let trace1 = make_trace(2000, 389, 17);
    let trace2 = make_trace(2200, 433, 71);
    let location = max_correlation(&trace1, &trace2, 300, 0.25).unwrap();

    c.bench_function("validate_location_200reps", |b| {
        b.iter(|| {
            let mut rng = RandomSource::from_seed(42);
            black_box(
                validate_location(&trace1, &trace2, &location, 300, 50, 50, 50, 200, &mut rng)
                    .unwrap(),
            )
        });
    });
}

fn bench_full_comparison(c: &mut Criterion) {
    let trace1 = make_trace(1500, 389, 17);
    let trace2 = make_trace(1500, 433, 71);
    let config = CompareConfig {
        search_window: 200,
        validation_window: 40,
        rigid_pairs: 50,
        random_pairs: 50,
        max_shift_fraction: 0.5,
        repetitions: 50,
    };

    c.bench_function("compare_pair", |b| {
        b.iter(|| {
            let mut rng = RandomSource::from_seed(7);
            black_box(compare(&trace1, &trace2, &config, &mut rng).unwrap())
        });
    });
}

criterion_group!(benches, bench_search, bench_validation, bench_full_comparison);
criterion_main!(benches);
