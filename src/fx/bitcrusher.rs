/*
Bitcrusher: quantize each sample to `2^bits` levels across [-1, 1] with a
mid-rise quantizer, then blend with the dry signal.

    step    = 2 / 2^bits
    crushed = (floor(x/step) + 0.5) * step, clamped to [-1, 1]

The mid-rise form guarantees bits = 1 really produces exactly two output
levels (±0.5 before clamping) instead of collapsing to zero; at bits = 16
the step is below f32 audio resolution and the unit is transparent within
rounding.
*/

pub struct Bitcrusher {
    bits: u32, // 1 - 16
    mix: f32,  // 0 - 1
}

impl Bitcrusher {
    pub fn new() -> Self {
        Self { bits: 8, mix: 0.5 }
    }

    pub fn set_bits(&mut self, bits: u32) {
        self.bits = bits.clamp(1, 16);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }

    #[inline]
    fn crush(&self, sample: f32) -> f32 {
        let step = 2.0 / (1u32 << self.bits) as f32;
        (((sample / step).floor() + 0.5) * step).clamp(-1.0, 1.0)
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let dry = *sample;
            *sample = dry * (1.0 - self.mix) + self.crush(dry) * self.mix;
        }
    }

    pub fn reset(&mut self) {}

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "bits" => self.set_bits(value as u32),
            "mix" => self.set_mix(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "bits" => Some(self.bits as f32),
            "mix" => Some(self.mix),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![("bits", self.bits as f32), ("mix", self.mix)]
    }
}

impl Default for Bitcrusher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_bits_is_transparent_within_rounding() {
        let mut crusher = Bitcrusher::new();
        crusher.set_bits(16);
        crusher.set_mix(1.0);

        let original: Vec<f32> = (0..512).map(|i| (i as f32 * 0.03).sin()).collect();
        let mut buffer = original.clone();
        crusher.process(&mut buffer);

        for (a, b) in original.iter().zip(buffer.iter()) {
            assert!((a - b).abs() < 1e-4, "{a} -> {b}");
        }
    }

    #[test]
    fn one_bit_yields_exactly_two_levels() {
        let mut crusher = Bitcrusher::new();
        crusher.set_bits(1);
        crusher.set_mix(1.0);

        let mut buffer: Vec<f32> = (0..256).map(|i| (i as f32 * 0.09).sin()).collect();
        crusher.process(&mut buffer);

        let mut levels: Vec<f32> = buffer.to_vec();
        levels.sort_by(|a, b| a.partial_cmp(b).unwrap());
        levels.dedup();
        assert_eq!(levels.len(), 2, "levels: {levels:?}");
    }

    #[test]
    fn eight_bits_quantizes_to_the_step_grid() {
        let mut crusher = Bitcrusher::new();
        crusher.set_bits(8);
        crusher.set_mix(1.0);

        let step = 2.0 / 256.0;
        let mut buffer = vec![0.123_4f32, -0.567_8, 0.9];
        crusher.process(&mut buffer);

        for &s in &buffer {
            let cells = (s / step) - 0.5;
            assert!(
                (cells - cells.round()).abs() < 1e-3,
                "{s} is not on the grid"
            );
        }
    }

    #[test]
    fn bits_clamp_to_supported_range() {
        let mut crusher = Bitcrusher::new();
        crusher.set_bits(0);
        assert_eq!(crusher.bits(), 1);
        crusher.set_param("bits", 99.0);
        assert_eq!(crusher.bits(), 16);
    }
}
