use crate::dsp::delay_line::DelayLine;

/*
Reverb
======

Deliberately small single-tap model, not a room simulator: one delay line of
at most 100 ms whose tap position scales with `room_size`. The output is an
equal blend of dry input and the damped delayed signal; the feedback written
back into the line scales with room size, so larger "rooms" both delay longer
and ring longer.

    tap      = room_size * 0.1 s
    out[n]   = 0.5*in[n] + 0.5*(1 - damping)*line[n - tap]
    line[n]  = in[n] + 0.5*room_size*line[n - tap]

damping = 1 removes the wet signal entirely; room_size = 0 degenerates to a
one-sample slapback (the tap offset never goes below one slot).
*/

const MAX_TAIL_SECONDS: f32 = 0.1;

pub struct Reverb {
    line: DelayLine,
    sample_rate: f32,
    room_size: f32, // 0.0 - 1.0
    damping: f32,   // 0.0 - 1.0
}

impl Reverb {
    pub fn new(room_size: f32, damping: f32, sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            line: DelayLine::with_duration(MAX_TAIL_SECONDS, sample_rate),
            sample_rate,
            room_size: room_size.clamp(0.0, 1.0),
            damping: damping.clamp(0.0, 1.0),
        }
    }

    pub fn set_room_size(&mut self, room_size: f32) {
        self.room_size = room_size.clamp(0.0, 1.0);
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    pub fn room_size(&self) -> f32 {
        self.room_size
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        let tap = (self.room_size * MAX_TAIL_SECONDS * self.sample_rate) as usize;
        let wet_gain = 0.5 * (1.0 - self.damping);
        let feedback = 0.5 * self.room_size;

        for sample in buffer.iter_mut() {
            let delayed = self.line.read(tap);
            let dry = *sample;
            *sample = dry * 0.5 + delayed * wet_gain;
            self.line.write(dry + delayed * feedback);
        }
    }

    pub fn reset(&mut self) {
        self.line.reset();
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "room_size" => self.set_room_size(value),
            "damping" => self.set_damping(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "room_size" => Some(self.room_size),
            "damping" => Some(self.damping),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![("room_size", self.room_size), ("damping", self.damping)]
    }
}
