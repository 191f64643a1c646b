//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modsynth::dsp::oscillator::Oscillator;
use modsynth::dsp::Waveform;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - sin() transcendental per sample
        let mut osc = Oscillator::new(440.0, Waveform::Sine, 44_100.0);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });

        // Sawtooth - linear ramp
        let mut osc = Oscillator::new(440.0, Waveform::Sawtooth, 44_100.0);
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });

        // Square - branch per sample
        let mut osc = Oscillator::new(440.0, Waveform::Square, 44_100.0);
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });

        // Triangle - absolute value
        let mut osc = Oscillator::new(440.0, Waveform::Triangle, 44_100.0);
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
