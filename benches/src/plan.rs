use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ratefeed::prelude::*;

const RATES: &[(u32, u32)] = &[(44100, 48000), (44101, 48000), (8000, 11025), (4000, 1_102_500)];

fn plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("ratefeed/plan");

    RATES.iter().for_each(|&(src, dst)| {
        group.bench_with_input(
            BenchmarkId::new("ConversionPlan::new", format!("{src}-{dst}")),
            &RateSpec::new(src * Hz, dst * Hz),
            |b, &spec| {
                b.iter(|| {
                    black_box(ConversionPlan::new(black_box(spec), ScalingPolicy::Optimal).unwrap());
                })
            },
        );
    });
    group.finish();
}

criterion_group!(benches, plan);
criterion_main!(benches);
