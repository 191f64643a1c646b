//! Benchmarks for low-level DSP primitives and the assembled voice.

mod effects;
mod envelope;
mod filter;
mod oscillator;
mod voice;

pub use effects::bench_effects;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use voice::bench_voice;
