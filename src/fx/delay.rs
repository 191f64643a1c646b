use crate::dsp::delay_line::DelayLine;

/*
Delay (echo)
============

Classic feedback echo: each output sample is the input plus a scaled copy of
what came out of the line `delay_time` seconds ago, and the *wet* output is
written back into the line. Feedback therefore applies to the already-mixed
signal, so each repeat contains all earlier repeats:

    out[n] = in[n] + feedback * line[n - D]
    line[n] = out[n]

An impulse through a 0.3 s delay at feedback 0.5 yields echoes at amplitudes
1.0, 0.5, 0.25, 0.125, ... spaced 0.3 s apart.

The line is allocated for MAX_DELAY_SECONDS at construction; shortening the
delay time just moves the read offset. Feedback is capped below 1.0 so the
echo train always decays.
*/

const MAX_DELAY_SECONDS: f32 = 2.0;

pub struct Delay {
    line: DelayLine,
    sample_rate: f32,
    delay_time: f32, // seconds
    feedback: f32,
}

impl Delay {
    pub fn new(delay_time: f32, feedback: f32, sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        let mut delay = Self {
            line: DelayLine::with_duration(MAX_DELAY_SECONDS, sample_rate),
            sample_rate,
            delay_time: 0.5,
            feedback: 0.4,
        };
        delay.set_delay_time(delay_time);
        delay.set_feedback(feedback);
        delay
    }

    pub fn set_delay_time(&mut self, seconds: f32) {
        self.delay_time = seconds.clamp(0.001, MAX_DELAY_SECONDS);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    pub fn delay_time(&self) -> f32 {
        self.delay_time
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        let offset = (self.delay_time * self.sample_rate) as usize;
        for sample in buffer.iter_mut() {
            let delayed = self.line.read(offset);
            let out = *sample + self.feedback * delayed;
            self.line.write(out);
            *sample = out;
        }
    }

    pub fn reset(&mut self) {
        self.line.reset();
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "time" => self.set_delay_time(value),
            "feedback" => self.set_feedback(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "time" => Some(self.delay_time),
            "feedback" => Some(self.feedback),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![("time", self.delay_time), ("feedback", self.feedback)]
    }
}
