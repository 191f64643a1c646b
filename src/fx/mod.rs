//! Effect units and the effect chain.
//!
//! Every unit consumes and returns a mono sample buffer in place, owns its
//! internal buffers and state, and exposes a clamped setter per documented
//! parameter plus a string-keyed `set_param`/`param` surface used by the
//! chain, the modulation router, and presets. Units are composed, never
//! shared: the chain owns its units outright.

/// Quantize to a reduced bit depth.
pub mod bitcrusher;
/// Ordered, named, bypassable sequence of effect units.
pub mod chain;
/// Dual delay-line chorus with cross-channel feedback.
pub mod chorus;
/// Soft-knee dynamics compressor.
pub mod compressor;
/// Feedback echo on a single delay line.
pub mod delay;
/// Waveshaping drive with tone control.
pub mod distortion;
/// Serial biquad bands (low shelf / peak / high shelf).
pub mod eq;
/// Cascaded allpass stages swept by an LFO.
pub mod phaser;
/// Single-tap damped reverb.
pub mod reverb;
/// Sine-carrier ring modulation.
pub mod ring_mod;
/// Iterative reflection wavefolder.
pub mod wavefolder;

pub use chain::{EffectChain, EffectUnit};
