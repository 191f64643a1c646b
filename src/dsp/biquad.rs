use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Biquad Filter
=============

A second-order recursive (IIR) filter evaluated in direct form I:

    y = b0·x + b1·x1 + b2·x2 − a1·y1 − a2·y2

with coefficients normalized so a0 = 1. Coefficient derivation follows the
RBJ audio-EQ cookbook for each response type.

| type      | passes            | extra parameter |
| --------- | ----------------- | --------------- |
| low-pass  | below cutoff      | —               |
| high-pass | above cutoff      | —               |
| band-pass | around cutoff     | —               |
| peak      | boosts/cuts band  | gain (dB)       |
| low-shelf | boosts/cuts lows  | gain (dB)       |
| high-shelf| boosts/cuts highs | gain (dB)       |

Coefficients are a pure function of {type, cutoff, Q, gain} and are recomputed
synchronously inside every setter; the filter never processes a sample with a
half-updated coefficient set. They are never derived incrementally.

Cutoff is clamped below Nyquist before derivation so degenerate inputs can
never put NaN into the sample stream.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiquadType {
    Lowpass,
    Highpass,
    Bandpass,
    Peak,
    LowShelf,
    HighShelf,
}

pub struct BiquadFilter {
    filter_type: BiquadType,
    cutoff_hz: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,

    // Normalized coefficients (a0 = 1)
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    // Two-sample input/output history
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BiquadFilter {
    pub fn new(filter_type: BiquadType, cutoff_hz: f32, q: f32, sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        let mut filter = Self {
            filter_type,
            cutoff_hz: 1000.0,
            q: 0.707,
            gain_db: 0.0,
            sample_rate,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        };
        filter.cutoff_hz = filter.clamp_cutoff(cutoff_hz);
        filter.q = q.clamp(0.1, 20.0);
        filter.recompute();
        filter
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(BiquadType::Lowpass, cutoff_hz, 0.707, sample_rate)
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(BiquadType::Highpass, cutoff_hz, 0.707, sample_rate)
    }

    pub fn bandpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(BiquadType::Bandpass, cutoff_hz, 0.707, sample_rate)
    }

    pub fn peak(cutoff_hz: f32, q: f32, gain_db: f32, sample_rate: f32) -> Self {
        let mut f = Self::new(BiquadType::Peak, cutoff_hz, q, sample_rate);
        f.set_gain_db(gain_db);
        f
    }

    pub fn low_shelf(cutoff_hz: f32, gain_db: f32, sample_rate: f32) -> Self {
        let mut f = Self::new(BiquadType::LowShelf, cutoff_hz, 0.707, sample_rate);
        f.set_gain_db(gain_db);
        f
    }

    pub fn high_shelf(cutoff_hz: f32, gain_db: f32, sample_rate: f32) -> Self {
        let mut f = Self::new(BiquadType::HighShelf, cutoff_hz, 0.707, sample_rate);
        f.set_gain_db(gain_db);
        f
    }

    fn clamp_cutoff(&self, cutoff_hz: f32) -> f32 {
        // Keep the corner safely below Nyquist; at Nyquist the prewarp blows up.
        let max = (self.sample_rate * 0.45).min(20_000.0);
        cutoff_hz.clamp(20.0, max)
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = self.clamp_cutoff(cutoff_hz);
        self.recompute();
    }

    pub fn set_q(&mut self, q: f32) {
        self.q = q.clamp(0.1, 20.0);
        self.recompute();
    }

    pub fn set_gain_db(&mut self, gain_db: f32) {
        self.gain_db = gain_db.clamp(-12.0, 12.0);
        self.recompute();
    }

    pub fn set_filter_type(&mut self, filter_type: BiquadType) {
        self.filter_type = filter_type;
        self.recompute();
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    pub fn filter_type(&self) -> BiquadType {
        self.filter_type
    }

    /// Derive coefficients from the current parameter set (RBJ cookbook).
    fn recompute(&mut self) {
        let w0 = TAU * self.cutoff_hz / self.sample_rate;
        let cos_w0 = w0.cos();
        let sin_w0 = w0.sin();
        let alpha = sin_w0 / (2.0 * self.q);
        let a = 10.0_f32.powf(self.gain_db / 40.0);

        let (b0, b1, b2, a0, a1, a2) = match self.filter_type {
            BiquadType::Lowpass => {
                let b1 = 1.0 - cos_w0;
                (b1 / 2.0, b1, b1 / 2.0, 1.0 + alpha, -2.0 * cos_w0, 1.0 - alpha)
            }
            BiquadType::Highpass => {
                let b1 = -(1.0 + cos_w0);
                (-b1 / 2.0, b1, -b1 / 2.0, 1.0 + alpha, -2.0 * cos_w0, 1.0 - alpha)
            }
            BiquadType::Bandpass => {
                (alpha, 0.0, -alpha, 1.0 + alpha, -2.0 * cos_w0, 1.0 - alpha)
            }
            BiquadType::Peak => (
                1.0 + alpha * a,
                -2.0 * cos_w0,
                1.0 - alpha * a,
                1.0 + alpha / a,
                -2.0 * cos_w0,
                1.0 - alpha / a,
            ),
            BiquadType::LowShelf => {
                let sqrt_a = a.sqrt();
                (
                    a * ((a + 1.0) - (a - 1.0) * cos_w0 + 2.0 * sqrt_a * alpha),
                    2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0),
                    a * ((a + 1.0) - (a - 1.0) * cos_w0 - 2.0 * sqrt_a * alpha),
                    (a + 1.0) + (a - 1.0) * cos_w0 + 2.0 * sqrt_a * alpha,
                    -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0),
                    (a + 1.0) + (a - 1.0) * cos_w0 - 2.0 * sqrt_a * alpha,
                )
            }
            BiquadType::HighShelf => {
                let sqrt_a = a.sqrt();
                (
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 + 2.0 * sqrt_a * alpha),
                    -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0),
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 - 2.0 * sqrt_a * alpha),
                    (a + 1.0) - (a - 1.0) * cos_w0 + 2.0 * sqrt_a * alpha,
                    2.0 * ((a - 1.0) - (a + 1.0) * cos_w0),
                    (a + 1.0) - (a - 1.0) * cos_w0 - 2.0 * sqrt_a * alpha,
                )
            }
        };

        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;

        debug_assert!(self.b0.is_finite() && self.a1.is_finite() && self.a2.is_finite());
    }

    /// Apply the difference equation to one sample and shift history.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let y = self.b0 * sample + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = sample;
        self.y2 = self.y1;
        self.y1 = y;

        y
    }

    /// Filter a buffer in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero the history without touching coefficients. Used when silencing a
    /// voice between notes so the previous note's tail cannot click through.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
