use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ratefeed::prelude::*;

const TEST_SIZES: &[usize] = &[256, 1024, 4096];

const POLICIES: &[ScalingPolicy] = &[
    ScalingPolicy::Exact64,
    ScalingPolicy::Scaled64,
    ScalingPolicy::Scaled32,
    ScalingPolicy::PlainCopyForced,
];

struct Sine {
    phase: usize,
}

impl ByteSource for Sine {
    fn fetch(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
        let n = dest.len() / FRAME_BYTES * FRAME_BYTES;
        dest[..n].chunks_exact_mut(FRAME_BYTES).for_each(|frame| {
            let v = ((self.phase as f32 * 0.0628).sin() * 16000.) as i16;
            frame[..2].copy_from_slice(&v.to_ne_bytes());
            frame[2..].copy_from_slice(&v.wrapping_neg().to_ne_bytes());
            self.phase += 1;
        });
        Ok(n)
    }
}

fn converter(src: u32, dst: u32, policy: ScalingPolicy) -> RateConverter {
    let mut c = RateConverter::new(FeederConfig::default()).unwrap();
    c.configure(RateSpec::new(src * Hz, dst * Hz), policy).unwrap();
    c
}

fn feed(c: &mut Criterion, name: &str, src: u32, dst: u32) {
    let mut group = c.benchmark_group(format!("ratefeed/feed/{name}"));

    POLICIES.iter().for_each(|&policy| {
        TEST_SIZES.iter().for_each(|&frames| {
            group.throughput(Throughput::Elements(frames as u64));
            group.bench_with_input(
                BenchmarkId::new(policy.to_string(), frames),
                &frames,
                |b, &frames| {
                    let mut converter = converter(src, dst, policy);
                    let mut source = Sine { phase: 0 };
                    let mut buf = vec![0u8; frames * FRAME_BYTES];
                    b.iter(|| {
                        black_box(converter.feed(black_box(&mut buf), &mut source).unwrap());
                    })
                },
            );
        });
    });
    group.finish();
}

fn cd_to_dat(c: &mut Criterion) {
    feed(c, "44100-48000", 44100, 48000);
}

fn dat_to_cd(c: &mut Criterion) {
    feed(c, "48000-44100", 48000, 44100);
}

fn narrowband(c: &mut Criterion) {
    feed(c, "8000-48000", 8000, 48000);
}

fn passthrough(c: &mut Criterion) {
    let mut group = c.benchmark_group("ratefeed/feed/passthrough");

    TEST_SIZES.iter().for_each(|&frames| {
        group.throughput(Throughput::Elements(frames as u64));
        group.bench_with_input(BenchmarkId::new("PlainCopy", frames), &frames, |b, &frames| {
            let mut converter = converter(48000, 48000, ScalingPolicy::Optimal);
            let mut source = Sine { phase: 0 };
            let mut buf = vec![0u8; frames * FRAME_BYTES];
            b.iter(|| {
                black_box(converter.feed(black_box(&mut buf), &mut source).unwrap());
            })
        });
    });
    group.finish();
}

criterion_group!(benches, cd_to_dat, dat_to_cd, narrowband, passthrough);
criterion_main!(benches);
