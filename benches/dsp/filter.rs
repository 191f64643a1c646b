//! Benchmarks for the biquad filter family.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modsynth::dsp::biquad::BiquadFilter;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let mut buffer: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        let mut lowpass = BiquadFilter::lowpass(1_000.0, 44_100.0);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| lowpass.render(black_box(&mut buffer)))
        });

        let mut peak = BiquadFilter::peak(1_000.0, 2.0, 6.0, 44_100.0);
        group.bench_with_input(BenchmarkId::new("peak", size), &size, |b, _| {
            b.iter(|| peak.render(black_box(&mut buffer)))
        });

        // Parameter churn: recompute coefficients every block, the worst
        // case a modulation route produces
        let mut swept = BiquadFilter::lowpass(1_000.0, 44_100.0);
        let mut cutoff = 500.0;
        group.bench_with_input(BenchmarkId::new("swept_lowpass", size), &size, |b, _| {
            b.iter(|| {
                cutoff = if cutoff > 4_000.0 { 500.0 } else { cutoff * 1.1 };
                swept.set_cutoff(black_box(cutoff));
                swept.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
