use std::f32::consts::TAU;

/*
Ring modulator: multiply the input by a sine carrier, then blend with the
dry signal. Sum and difference frequencies appear, the original pitch
disappears at full mix. The carrier phase advances once per sample and
persists across blocks.
*/

pub struct RingModulator {
    sample_rate: f32,
    carrier_phase: f32,

    frequency: f32, // carrier Hz, 1 - 5000
    mix: f32,       // 0 - 1
}

impl RingModulator {
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            sample_rate,
            carrier_phase: 0.0,
            frequency: 440.0,
            mix: 0.5,
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.clamp(1.0, 5_000.0);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        let increment = TAU * self.frequency / self.sample_rate;
        for sample in buffer.iter_mut() {
            self.carrier_phase += increment;
            if self.carrier_phase >= TAU {
                self.carrier_phase -= TAU;
            }
            let carrier = self.carrier_phase.sin();
            let dry = *sample;
            *sample = dry * (1.0 - self.mix) + dry * carrier * self.mix;
        }
    }

    pub fn reset(&mut self) {
        self.carrier_phase = 0.0;
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "frequency" => self.set_frequency(value),
            "mix" => self.set_mix(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "frequency" => Some(self.frequency),
            "mix" => Some(self.mix),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![("frequency", self.frequency), ("mix", self.mix)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    #[test]
    fn zero_mix_is_transparent() {
        let mut ring = RingModulator::new(SAMPLE_RATE);
        ring.set_mix(0.0);

        let original: Vec<f32> = (0..256).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut buffer = original.clone();
        ring.process(&mut buffer);
        assert_eq!(original, buffer);
    }

    #[test]
    fn full_mix_tracks_the_carrier() {
        let mut ring = RingModulator::new(SAMPLE_RATE);
        ring.set_mix(1.0);
        ring.set_frequency(441.0); // 100-sample period

        // DC input makes the output literally the carrier
        let mut buffer = vec![1.0f32; 400];
        ring.process(&mut buffer);

        let expected: Vec<f32> = (1..=400)
            .map(|n| (TAU * 441.0 * n as f32 / SAMPLE_RATE).sin())
            .collect();
        for (a, b) in buffer.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn carrier_phase_continues_across_blocks() {
        let mut one_pass = RingModulator::new(SAMPLE_RATE);
        let mut two_pass = RingModulator::new(SAMPLE_RATE);
        one_pass.set_mix(1.0);
        two_pass.set_mix(1.0);

        let mut a = vec![1.0f32; 512];
        one_pass.process(&mut a);

        let mut b = vec![1.0f32; 512];
        let (first, second) = b.split_at_mut(256);
        two_pass.process(first);
        two_pass.process(second);

        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6);
        }
    }
}
