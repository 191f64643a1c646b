#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::Waveform;

/// One engine parameter addressable over the message queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineParam {
    OscFrequency,
    FilterCutoff,
    FilterResonance,
    FilterGainDb,
    EnvAttack,
    EnvDecay,
    EnvSustain,
    EnvRelease,
    Volume,
}

/// Control message from the UI/control thread to the render thread. All
/// variants are Copy so the queue never owns heap data.
#[derive(Debug, Copy, Clone)]
pub enum EngineMessage {
    NoteOn { frequency: f32, velocity: f32 },
    NoteOff,
    AllNotesOff,
    SetWaveform(Waveform),
    SetParam(EngineParam, f32),
}

/// Source of pending control messages, drained at block start.
///
/// Decouples the engine from the queue implementation so the `rtrb` feature
/// can be turned off (tests drive the engine directly).
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<EngineMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<EngineMessage> {
    fn pop(&mut self) -> Option<EngineMessage> {
        Consumer::pop(self).ok()
    }
}

/// A plain vector drained front to back. Handy in tests and offline use.
impl MessageReceiver for std::collections::VecDeque<EngineMessage> {
    fn pop(&mut self) -> Option<EngineMessage> {
        self.pop_front()
    }
}
