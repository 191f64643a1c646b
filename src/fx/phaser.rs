use std::f32::consts::TAU;

use crate::dsp::delay_line::DelayLine;

/*
Phaser
======

Cascaded first-order allpass stages, one short delay line per stage, swept by
a single LFO. Every sample the LFO picks a corner frequency between 200 Hz
and 4 kHz (depth scales how far the sweep reaches), which yields both the tap
offset and the allpass coefficient:

    delay  = sr / (2π·f), clamped to [1, 100] samples
    alpha  = (1 - f/(sr/2)) / (1 + f/(sr/2))
    y      = delayed + alpha*(x - delayed)

The final stage blends feedback (`y·fb + delayed·(1-fb)`) before the dry/wet
mix. Moving notches appear where the phase-shifted copy cancels the dry
signal.
*/

const MIN_SWEEP_HZ: f32 = 200.0;
const MAX_SWEEP_HZ: f32 = 4_000.0;
const STAGE_CAPACITY: usize = 1_024;
const MAX_STAGES: usize = 8;

pub struct Phaser {
    stages: Vec<DelayLine>,
    sample_rate: f32,
    lfo_phase: f32, // cycles, [0, 1)

    rate: f32,     // Hz, 0.1 - 10
    depth: f32,    // 0 - 1
    mix: f32,      // 0 - 1
    feedback: f32, // 0 - 0.95
}

impl Phaser {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_stages(4, sample_rate)
    }

    pub fn with_stages(stages: usize, sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        let stages = stages.clamp(1, MAX_STAGES);
        Self {
            stages: (0..stages).map(|_| DelayLine::new(STAGE_CAPACITY)).collect(),
            sample_rate,
            lfo_phase: 0.0,
            rate: 0.5,
            depth: 0.5,
            mix: 0.5,
            feedback: 0.3,
        }
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.clamp(0.1, 10.0);
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.95);
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        let nyquist = self.sample_rate / 2.0;
        let last = self.stages.len() - 1;

        for out in buffer.iter_mut() {
            self.lfo_phase = (self.lfo_phase + self.rate / self.sample_rate) % 1.0;
            let lfo = ((TAU * self.lfo_phase).sin() + 1.0) / 2.0;
            let freq = MIN_SWEEP_HZ + lfo * self.depth * (MAX_SWEEP_HZ - MIN_SWEEP_HZ);

            let offset = (self.sample_rate / (TAU * freq)) as usize;
            let offset = offset.clamp(1, 100);
            let alpha = (1.0 - freq / nyquist) / (1.0 + freq / nyquist);

            let dry = *out;
            let mut sample = dry;
            for (i, line) in self.stages.iter_mut().enumerate() {
                let delayed = line.next_sample(sample, offset);
                sample = delayed + alpha * (sample - delayed);
                if i == last {
                    sample = sample * self.feedback + delayed * (1.0 - self.feedback);
                }
            }

            *out = dry * (1.0 - self.mix) + sample * self.mix;
        }
    }

    pub fn reset(&mut self) {
        for line in &mut self.stages {
            line.reset();
        }
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
