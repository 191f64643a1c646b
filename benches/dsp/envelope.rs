//! Benchmarks for the ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modsynth::dsp::envelope::Envelope;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sustain stage: the steady-state cost of a held note
        let mut env = Envelope::adsr(0.001, 0.001, 0.7, 0.1, 44_100.0);
        env.trigger();
        for _ in 0..1_000 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer)))
        });

        // Retrigger every block: attack-stage arithmetic
        let mut env = Envelope::adsr(1.0, 0.2, 0.7, 0.3, 44_100.0);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.trigger();
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
