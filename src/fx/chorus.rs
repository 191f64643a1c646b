use std::f32::consts::TAU;

use crate::dsp::delay_line::DelayLine;

/*
Chorus
======

A short delay (25 ms base) whose read offset is swept by a sine LFO
(`delay ± depth·lfo`), detuning the delayed copy slightly against the dry
signal. Two lines exist so a stereo caller gets independent left/right images
with cross-channel feedback (left feedback feeds the right write and vice
versa), which widens the image instead of just thickening it.

The mono `process` path drives the left line with self-feedback; the chain
runs mono, so that is the path used in practice. The swept offset is
fractional, read with linear interpolation to avoid zipper noise as the LFO
moves the tap between slots.

Depth is expressed in seconds of sweep (up to 10 ms) so the combined
base + sweep never exceeds the 50 ms line capacity.
*/

const MAX_CHORUS_SECONDS: f32 = 0.05;
const BASE_DELAY_SECONDS: f32 = 0.025;

pub struct Chorus {
    left: DelayLine,
    right: DelayLine,
    sample_rate: f32,
    lfo_phase: f32,

    rate: f32,     // LFO Hz, 0.1 - 2.0
    depth: f32,    // sweep in seconds, 0 - 0.01
    mix: f32,      // 0.0 - 1.0
    feedback: f32, // 0.0 - 0.9
}

impl Chorus {
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            left: DelayLine::with_duration(MAX_CHORUS_SECONDS, sample_rate),
            right: DelayLine::with_duration(MAX_CHORUS_SECONDS, sample_rate),
            sample_rate,
            lfo_phase: 0.0,
            rate: 0.5,
            depth: 0.003,
            mix: 0.5,
            feedback: 0.0,
        }
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.clamp(0.1, 2.0);
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 0.01);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.9);
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    #[inline]
    fn advance_lfo(&mut self) -> f32 {
        self.lfo_phase += TAU * self.rate / self.sample_rate;
        if self.lfo_phase >= TAU {
            self.lfo_phase -= TAU;
        }
        // Swept tap position in samples
        (BASE_DELAY_SECONDS + self.depth * self.lfo_phase.sin()) * self.sample_rate
    }

    /// Mono path used by the effect chain: left line, self-feedback.
    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let offset = self.advance_lfo();
            let delayed = self.left.read_interpolated(offset);
            let dry = *sample;

            self.left.write(dry + delayed * self.feedback);
            *sample = dry * (1.0 - self.mix) + delayed * self.mix;
        }
    }

    /// Stereo path with cross-channel feedback.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let offset = self.advance_lfo();
            let delayed_l = self.left.read_interpolated(offset);
            let delayed_r = self.right.read_interpolated(offset);
            let (dry_l, dry_r) = (*l, *r);

            self.left.write(dry_l + delayed_r * self.feedback);
            self.right.write(dry_r + delayed_l * self.feedback);

            *l = dry_l * (1.0 - self.mix) + delayed_l * self.mix;
            *r = dry_r * (1.0 - self.mix) + delayed_r * self.mix;
        }
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.lfo_phase = 0.0;
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "rate" => self.set_rate(value),
            "depth" => self.set_depth(value),
            "mix" => self.set_mix(value),
            "feedback" => self.set_feedback(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "rate" => Some(self.rate),
            "depth" => Some(self.depth),
            "mix" => Some(self.mix),
            "feedback" => Some(self.feedback),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![
            ("rate", self.rate),
            ("depth", self.depth),
            ("mix", self.mix),
            ("feedback", self.feedback),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    #[test]
    fn dry_only_at_zero_mix() {
        let mut chorus = Chorus::new(SAMPLE_RATE);
        chorus.set_mix(0.0);

        let original: Vec<f32> = (0..512).map(|i| (i as f32 * 0.01).sin()).collect();
        let mut buffer = original.clone();
        chorus.process(&mut buffer);

        for (a, b) in original.iter().zip(buffer.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn wet_path_delays_the_signal() {
        let mut chorus = Chorus::new(SAMPLE_RATE);
        chorus.set_mix(1.0);
        chorus.set_depth(0.0); // fixed 25 ms tap

        let base_samples = (BASE_DELAY_SECONDS * SAMPLE_RATE) as usize;
        let mut buffer = vec![0.0f32; base_samples + 64];
        buffer[0] = 1.0;
        chorus.process(&mut buffer);

        // Nothing before the tap, the impulse at (or adjacent to) it
        assert!(buffer[..base_samples - 1].iter().all(|&s| s.abs() < 1e-6));
        let peak: f32 = buffer[base_samples - 1..=base_samples + 1]
            .iter()
            .fold(0.0, |m, &s| m.max(s.abs()));
        assert!(peak > 0.4, "delayed impulse missing, peak {peak}");
    }

    #[test]
    fn stereo_cross_feedback_couples_channels() {
        let mut chorus = Chorus::new(SAMPLE_RATE);
        chorus.set_mix(1.0);
        chorus.set_feedback(0.8);
        chorus.set_depth(0.0);

        // Impulse only on the left; cross feedback must eventually leak it
        // into the right channel.
        let len = (BASE_DELAY_SECONDS * SAMPLE_RATE) as usize * 3;
        let mut left = vec![0.0f32; len];
        let mut right = vec![0.0f32; len];
        left[0] = 1.0;
        chorus.process_stereo(&mut left, &mut right);

        let right_energy: f32 = right.iter().map(|s| s * s).sum();
        assert!(right_energy > 0.0, "cross feedback never reached the right channel");
    }

    #[test]
    fn setters_clamp_to_documented_ranges() {
        let mut chorus = Chorus::new(SAMPLE_RATE);
        chorus.set_rate(100.0);
        assert_eq!(chorus.rate(), 2.0);
        chorus.set_depth(1.0);
        assert_eq!(chorus.depth(), 0.01);
        chorus.set_feedback(1.0);
        assert_eq!(chorus.feedback(), 0.9);
        assert!(!chorus.set_param("resonance", 1.0));
    }
}
