use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Waveform Math
=============

A waveform maps a phase in radians to a sample in [-1, 1]. The mapping is a
pure function: phase ownership (advance) belongs to the oscillator, which
makes each shape independently testable with fixed phase values. The phase is
wrapped into [0, 2π) here, so the piecewise shapes hold for any input and
`sample(phase + 2π) == sample(phase)` everywhere.

  Sine      sin(phase)                 smooth, single harmonic
  Square    sign(sin(phase))           odd harmonics, hollow
  Sawtooth  2·(phase/2π) − 1           all harmonics, bright
  Triangle  1 − 2·|phase/π − 1|        weak odd harmonics, mellow

Fixed points at phase 0: Sine = 0, Square = 1, Sawtooth = −1, Triangle = −1.
The triangle expression is continuous across the phase wrap (−1 at both 0 and
2π), so a frequency change never produces a step in the output.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Evaluate the waveform at `phase` (radians; any value, wrapped mod 2π).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        let phase = phase.rem_euclid(TAU);
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Square => {
                if phase.sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (phase / TAU) - 1.0,
            Waveform::Triangle => 1.0 - 2.0 * (phase / PI - 1.0).abs(),
        }
    }
}
