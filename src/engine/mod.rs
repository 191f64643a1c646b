//! The real-time voice engine and its control-message queue.
//!
//! The engine lives on the audio thread; everything else talks to it through
//! [`EngineMessage`]s pushed into a wait-free queue and drained at the start
//! of every rendered block. Nothing in this module allocates, locks, or
//! performs I/O once construction is done.

pub mod message;
pub mod voice;

pub use message::{EngineMessage, EngineParam, MessageReceiver};
pub use voice::{VoiceEngine, VoiceState};
