//! Low-level DSP primitives used by the engine and the effect units.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside the voice engine and effect structs. They
//! intentionally stay focused on the signal-processing math so the engine and
//! modulation layers can handle orchestration.

/// RBJ-cookbook second-order IIR filter with six responses.
pub mod biquad;
/// Fixed-capacity circular delay buffer.
pub mod delay_line;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Phase-owning oscillators at audio and sub-audio rates.
pub mod oscillator;
/// Stateless phase-to-sample waveform math.
pub mod waveform;

pub use envelope::EnvelopeState;
pub use waveform::Waveform;
