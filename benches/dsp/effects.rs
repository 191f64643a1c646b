//! Benchmarks for individual effect units and a loaded chain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modsynth::fx::bitcrusher::Bitcrusher;
use modsynth::fx::chorus::Chorus;
use modsynth::fx::compressor::Compressor;
use modsynth::fx::delay::Delay;
use modsynth::fx::distortion::Distortion;
use modsynth::fx::eq::ParametricEq;
use modsynth::fx::phaser::Phaser;
use modsynth::fx::reverb::Reverb;
use modsynth::fx::{EffectChain, EffectUnit};

use crate::BLOCK_SIZES;

const SR: f32 = 44_100.0;

pub fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/effects");

    for &size in BLOCK_SIZES {
        let mut buffer: Vec<f32> = (0..size).map(|i| 0.5 * (i as f32 * 0.07).sin()).collect();

        let mut delay = Delay::new(0.3, 0.5, SR);
        group.bench_with_input(BenchmarkId::new("delay", size), &size, |b, _| {
            b.iter(|| delay.process(black_box(&mut buffer)))
        });

        let mut reverb = Reverb::new(0.7, 0.4, SR);
        group.bench_with_input(BenchmarkId::new("reverb", size), &size, |b, _| {
            b.iter(|| reverb.process(black_box(&mut buffer)))
        });

        // Chorus: interpolated read plus per-sample LFO
        let mut chorus = Chorus::new(SR);
        group.bench_with_input(BenchmarkId::new("chorus", size), &size, |b, _| {
            b.iter(|| chorus.process(black_box(&mut buffer)))
        });

        // Compressor: log10/powf per sample, the heaviest unit
        let mut comp = Compressor::new(SR);
        group.bench_with_input(BenchmarkId::new("compressor", size), &size, |b, _| {
            b.iter(|| comp.process(black_box(&mut buffer)))
        });

        let mut eq = ParametricEq::new(SR);
        group.bench_with_input(BenchmarkId::new("eq", size), &size, |b, _| {
            b.iter(|| eq.process(black_box(&mut buffer)))
        });

        // Phaser: four allpass stages per sample
        let mut phaser = Phaser::new(SR);
        group.bench_with_input(BenchmarkId::new("phaser", size), &size, |b, _| {
            b.iter(|| phaser.process(black_box(&mut buffer)))
        });

        // A realistic loaded chain
        let mut chain = EffectChain::new();
        chain.add("dist", EffectUnit::Distortion(Distortion::new(0.4, 0.6)));
        chain.add("crush", EffectUnit::Bitcrusher(Bitcrusher::new()));
        chain.add("chorus", EffectUnit::Chorus(Chorus::new(SR)));
        chain.add("echo", EffectUnit::Delay(Delay::new(0.25, 0.4, SR)));
        chain.add("comp", EffectUnit::Compressor(Compressor::new(SR)));
        group.bench_with_input(BenchmarkId::new("chain_x5", size), &size, |b, _| {
            b.iter(|| chain.process(black_box(&mut buffer)))
        });
    }

    group.finish();
}
