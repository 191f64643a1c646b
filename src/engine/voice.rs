use crate::dsp::biquad::BiquadFilter;
use crate::dsp::envelope::Envelope;
use crate::dsp::oscillator::Oscillator;
use crate::dsp::Waveform;
use crate::engine::message::{EngineMessage, EngineParam, MessageReceiver};

/*
Voice Engine
============

One monophonic voice: oscillator -> filter -> envelope gain -> velocity and
volume scaling. The voice is created once and reused for every note; note-on
retunes the oscillator (phase preserved, so a legato retrigger does not
click at the waveform level) and hard-retriggers the envelope.

    Silent --note_on--> Sounding --(envelope idle)--> Silent

While Silent the render path writes zeros without running any DSP; the
transition back happens inside the render loop the moment the envelope
finishes its release, at which point the filter history is cleared so the
next note starts from a clean state.

`process_block` is the audio-callback entry point: drain every pending
control message, then render. Draining first means a NoteOn and a parameter
change sent together take effect in the same block, in the order they were
pushed.
*/

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VoiceState {
    Silent,
    Sounding,
}

pub struct VoiceEngine {
    oscillator: Oscillator,
    filter: BiquadFilter,
    envelope: Envelope,
    volume: f32,
    velocity: f32,
    state: VoiceState,
}

impl VoiceEngine {
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            oscillator: Oscillator::new(440.0, Waveform::Sawtooth, sample_rate),
            filter: BiquadFilter::lowpass(2_000.0, sample_rate),
            envelope: Envelope::adsr(0.01, 0.2, 0.7, 0.3, sample_rate),
            volume: 0.5,
            velocity: 0.0,
            state: VoiceState::Silent,
        }
    }

    /// Retune, retrigger, and start sounding. Velocity scales the output
    /// linearly and is clamped to [0, 1].
    pub fn note_on(&mut self, frequency: f32, velocity: f32) {
        self.oscillator.set_frequency(frequency.clamp(20.0, 20_000.0));
        self.velocity = velocity.clamp(0.0, 1.0);
        self.envelope.trigger();
        self.state = VoiceState::Sounding;
    }

    /// Begin the envelope release. The voice keeps sounding until the
    /// release ramp reaches zero.
    pub fn note_off(&mut self) {
        self.envelope.release();
    }

    /// Immediate silence: no release tail, filter history dropped.
    pub fn all_notes_off(&mut self) {
        self.envelope.reset();
        self.filter.reset();
        self.state = VoiceState::Silent;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state == VoiceState::Sounding
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    pub fn oscillator_mut(&mut self) -> &mut Oscillator {
        &mut self.oscillator
    }

    pub fn filter(&self) -> &BiquadFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut BiquadFilter {
        &mut self.filter
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    pub fn handle_message(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::NoteOn {
                frequency,
                velocity,
            } => self.note_on(frequency, velocity),
            EngineMessage::NoteOff => self.note_off(),
            EngineMessage::AllNotesOff => self.all_notes_off(),
            EngineMessage::SetWaveform(waveform) => self.oscillator.set_waveform(waveform),
            EngineMessage::SetParam(param, value) => match param {
                EngineParam::OscFrequency => self.oscillator.set_frequency(value),
                EngineParam::FilterCutoff => self.filter.set_cutoff(value),
                EngineParam::FilterResonance => self.filter.set_q(value),
                EngineParam::FilterGainDb => self.filter.set_gain_db(value),
                EngineParam::EnvAttack => self.envelope.set_attack(value),
                EngineParam::EnvDecay => self.envelope.set_decay(value),
                EngineParam::EnvSustain => self.envelope.set_sustain(value),
                EngineParam::EnvRelease => self.envelope.set_release(value),
                EngineParam::Volume => self.set_volume(value),
            },
        }
    }

    /// Drain every pending message, in push order.
    pub fn drain_messages<R: MessageReceiver>(&mut self, rx: &mut R) {
        while let Some(msg) = rx.pop() {
            self.handle_message(msg);
        }
    }

    /// One output sample. Zero while Silent, with no DSP work done.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.state == VoiceState::Silent {
            return 0.0;
        }

        let raw = self.oscillator.next_sample();
        let filtered = self.filter.process(raw);
        let gain = self.envelope.next_sample();
        let out = filtered * gain * self.velocity * self.volume;

        if !self.envelope.is_active() {
            self.state = VoiceState::Silent;
            self.filter.reset();
        }
        out
    }

    /// Render one block without touching the message queue.
    pub fn render_block(&mut self, out: &mut [f32]) {
        if self.state == VoiceState::Silent {
            out.fill(0.0);
            return;
        }
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Audio-callback entry point: drain messages, then render.
    pub fn process_block<R: MessageReceiver>(&mut self, rx: &mut R, out: &mut [f32]) {
        self.drain_messages(rx);
        self.render_block(out);
    }
}
