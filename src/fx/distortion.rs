/*
Distortion
==========

Tanh waveshaper with a pre-gain and a tone control:

    boosted = x * (1 + drive*10)
    shaped  = tanh(k * boosted) / tanh(k),  k = 1 + drive*4

Dividing by tanh(k) renormalizes so a full-scale input still reaches full
scale; higher drive pushes more of the waveform into the flat part of the
curve. Output is hard-limited to [-1, 1] since the pre-gain can overshoot
between the tanh asymptotes at low drive.

Tone above 0.5 engages a one-pole lowpass whose smoothing strengthens as
tone approaches 1, taming the shaper's added brightness. At or below 0.5
the filter is bypassed and its state tracks the input, so sweeping tone
across the boundary does not click.
*/

pub struct Distortion {
    drive: f32, // 0 - 1
    tone: f32,  // 0 - 1
    lowpass_state: f32,
}

impl Distortion {
    pub fn new(drive: f32, tone: f32) -> Self {
        Self {
            drive: drive.clamp(0.0, 1.0),
            tone: tone.clamp(0.0, 1.0),
            lowpass_state: 0.0,
        }
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.drive = drive.clamp(0.0, 1.0);
    }

    pub fn set_tone(&mut self, tone: f32) {
        self.tone = tone.clamp(0.0, 1.0);
    }

    pub fn drive(&self) -> f32 {
        self.drive
    }

    pub fn tone(&self) -> f32 {
        self.tone
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        let pre_gain = 1.0 + self.drive * 10.0;
        let k = 1.0 + self.drive * 4.0;
        let norm = k.tanh();
        // tone 0.5 -> alpha 1 (bypass), tone 1.0 -> alpha 0.2 (dark)
        let darken = (self.tone - 0.5).max(0.0) * 2.0;
        let alpha = 1.0 - 0.8 * darken;

        for sample in buffer.iter_mut() {
            let shaped = ((*sample * pre_gain * k).tanh() / norm).clamp(-1.0, 1.0);
            self.lowpass_state += alpha * (shaped - self.lowpass_state);
            *sample = self.lowpass_state;
        }
    }

    pub fn reset(&mut self) {
        self.lowpass_state = 0.0;
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "drive" => self.set_drive(value),
            "tone" => self.set_tone(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "drive" => Some(self.drive),
            "tone" => Some(self.tone),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![("drive", self.drive), ("tone", self.tone)]
    }
}
