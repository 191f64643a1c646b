use std::f32::consts::TAU;

use crate::dsp::waveform::Waveform;

/*
Oscillator
==========

The oscillator owns its phase: a value in [0, 2π) advanced by 2π·f/sr every
sample and wrapped modulo 2π. The waveform math itself lives in `waveform.rs`
and is stateless.

Changing the frequency updates the per-sample increment but never touches the
phase, so a runtime frequency change produces no discontinuity larger than one
sample's worth of advance. Resetting the phase is an explicit, separate
operation used when a voice is silenced between notes.

The same machinery serves both audible oscillators (20 Hz - 20 kHz) and LFOs
(0.01 Hz - 20 Hz); `Lfo` below adds the per-tick accessor that parameter
modulation needs.
*/

pub struct Oscillator {
    waveform: Waveform,
    frequency: f32,
    sample_rate: f32,
    phase: f32,
    phase_increment: f32,
}

impl Oscillator {
    pub fn new(frequency: f32, waveform: Waveform, sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        let frequency = frequency.clamp(0.01, 20_000.0);
        Self {
            waveform,
            frequency,
            sample_rate,
            phase: 0.0,
            phase_increment: TAU * frequency / sample_rate,
        }
    }

    /// Change frequency without resetting phase (click-free).
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.clamp(0.01, 20_000.0);
        self.phase_increment = TAU * self.frequency / self.sample_rate;
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.waveform.sample(self.phase);
        self.phase += self.phase_increment;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        sample
    }

    /// Fill a buffer with oscillator output.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Rewind phase to zero. Used between notes, never mid-note.
    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }
}

/// Sub-audio oscillator used as a modulation source.
///
/// Same phase machinery as [`Oscillator`], plus `value()` which reads the
/// current output without advancing, so the router can sample it once per
/// block and advance it separately.
pub struct Lfo {
    osc: Oscillator,
}

impl Lfo {
    pub fn new(frequency: f32, waveform: Waveform, sample_rate: f32) -> Self {
        Self {
            osc: Oscillator::new(frequency, waveform, sample_rate),
        }
    }

    pub fn sine(frequency: f32, sample_rate: f32) -> Self {
        Self::new(frequency, Waveform::Sine, sample_rate)
    }

    pub fn triangle(frequency: f32, sample_rate: f32) -> Self {
        Self::new(frequency, Waveform::Triangle, sample_rate)
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.osc.set_frequency(frequency);
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.osc.set_waveform(waveform);
    }

    /// Current output in [-1, 1] at the present phase.
    #[inline]
    pub fn value(&self) -> f32 {
        self.osc.waveform.sample(self.osc.phase)
    }

    /// Advance the LFO phase by `samples` samples.
    pub fn advance(&mut self, samples: usize) {
        let increment = self.osc.phase_increment * samples as f32;
        self.osc.phase = (self.osc.phase + increment) % TAU;
    }
}
