use criterion::{black_box, BatchSize, BenchmarkId, Criterion};
use criterion::{criterion_group, criterion_main};

use cactus_scalars::{merge_restarts, TimeSeries};

const ROWS_PER_RESTART: usize = 50_000;

fn restarts(count: usize, overlap: usize) -> Vec<TimeSeries> {
    (0..count)
        .map(|restart| {
            let start = restart * (ROWS_PER_RESTART - overlap);
            let t: Vec<f64> = (start..start + ROWS_PER_RESTART)
                .map(|step| step as f64 * 0.25)
                .collect();
            let y = t.iter().map(|time| time.sin()).collect();
            TimeSeries::new(t, y).expect("series")
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_restarts");
    for &count in &[2_usize, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || restarts(count, 1_000),
                |parts| black_box(merge_restarts(parts)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
