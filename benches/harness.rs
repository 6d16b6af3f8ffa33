//! Criterion benches for the hot non-measurement paths: reduction and
//! history merging. The timing loop itself is dominated by the measured
//! case, so it is not benched here.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use perftrack::{reduce, Experiment, History, RunInfo};

fn experiment(avg: f64) -> Experiment {
    Experiment {
        info: RunInfo {
            date: "2026-08-30T00:00:00+00:00".to_string(),
            repeat: 3,
            number: 0,
        },
        best: avg * 0.9,
        avg,
        worst: avg * 1.1,
    }
}

fn bench_reduce(c: &mut Criterion) {
    let trials: Vec<f64> = (0..1_000).map(|i| 0.01 + (i as f64) * 1e-6).collect();
    c.bench_function("reduce_1000_trials", |b| {
        b.iter(|| reduce(criterion::black_box(&trials), trials.len(), 100).unwrap())
    });
}

fn bench_merge(c: &mut Criterion) {
    c.bench_function("merge_1000_experiments_one_test", |b| {
        b.iter_batched(
            History::in_memory,
            |mut history| {
                for i in 0..1_000u32 {
                    let avg = f64::from(i % 17) * 0.001;
                    history.merge("bench.case", experiment(avg));
                }
                history
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("merge_across_500_tests", |b| {
        let ids: Vec<String> = (0..500).map(|i| format!("bench.case.{i}")).collect();
        b.iter_batched(
            History::in_memory,
            |mut history| {
                for id in &ids {
                    history.merge(id.clone(), experiment(0.002));
                }
                history
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_reduce, bench_merge);
criterion_main!(benches);
