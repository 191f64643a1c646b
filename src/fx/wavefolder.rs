/*
Wavefolder: drive the sample past full scale, then reflect anything outside
[-1, 1] back inside (x > 1 becomes 2 - x, x < -1 becomes -2 - x). Four
reflection passes cover the worst case at maximum drive; the result is
divided by drive and blended with the dry signal. Unlike clipping, folding
keeps amplitude variation above the threshold, adding harmonics without
flattening the waveform.
*/

pub struct Wavefolder {
    drive: f32, // 1 - 4
    mix: f32,   // 0 - 1
}

impl Wavefolder {
    pub fn new() -> Self {
        Self {
            drive: 1.0,
            mix: 0.5,
        }
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.drive = drive.clamp(1.0, 4.0);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    pub fn drive(&self) -> f32 {
        self.drive
    }

    pub fn mix(&self) -> f32 {
        self.mix
    }

    #[inline]
    fn fold(&self, sample: f32) -> f32 {
        let mut x = sample * self.drive;
        // Drive <= 4 means at most four reflections bring x back into range
        for _ in 0..4 {
            if x > 1.0 {
                x = 2.0 - x;
            } else if x < -1.0 {
                x = -2.0 - x;
            }
        }
        x / self.drive
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let dry = *sample;
            *sample = dry * (1.0 - self.mix) + self.fold(dry) * self.mix;
        }
    }

    pub fn reset(&mut self) {}

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "drive" => self.set_drive(value),
            "mix" => self.set_mix(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "drive" => Some(self.drive),
            "mix" => Some(self.mix),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![("drive", self.drive), ("mix", self.mix)]
    }
}

impl Default for Wavefolder {
    fn default() -> Self {
        Self::new()
    }
}
