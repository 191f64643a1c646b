//! Benchmark for the full voice render path: oscillator through filter and
//! envelope, with and without the modulation router ticking.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modsynth::automation::{ModScaling, ModTarget, ModulationRouter};
use modsynth::dsp::oscillator::Lfo;
use modsynth::engine::VoiceEngine;
use modsynth::fx::delay::Delay;
use modsynth::fx::{EffectChain, EffectUnit};

use crate::BLOCK_SIZES;

const SR: f32 = 44_100.0;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/voice");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut engine = VoiceEngine::new(SR);
        engine.note_on(220.0, 1.0);
        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| engine.render_block(black_box(&mut buffer)))
        });

        // Full callback: router tick, voice render, chain process
        let mut engine = VoiceEngine::new(SR);
        let mut chain = EffectChain::new();
        chain.add("echo", EffectUnit::Delay(Delay::new(0.25, 0.4, SR)));
        let mut router = ModulationRouter::new(SR);
        router.add_lfo_route(
            Lfo::sine(2.0, SR),
            ModTarget::FilterCutoff,
            0.8,
            ModScaling::Span {
                min: 300.0,
                max: 3_000.0,
            },
        );
        router.start(&engine, &chain);
        engine.note_on(220.0, 1.0);

        group.bench_with_input(BenchmarkId::new("full_callback", size), &size, |b, _| {
            b.iter(|| {
                router.process_block(&mut engine, &mut chain, size);
                engine.render_block(black_box(&mut buffer));
                chain.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
