pub mod automation; // LFO routes and timed automation lanes
pub mod dsp;
pub mod engine; // Voice state machine and control messages
pub mod fx; // Effect units and the effect chain
pub mod preset;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
