/*
Delay Line
==========

Fixed-capacity circular sample buffer. One write cursor advances by one slot
per sample (mod N); reads are expressed as an offset behind the write cursor,
`read_pos = (w - offset) mod N`.

The offset is always clamped to [1, N-1]: offset 0 would read the slot about
to be overwritten, offset >= N would wrap past the write cursor into samples
from the current lap. Under modulation (chorus, phaser) the offset moves every
sample, so `read_interpolated` provides linear interpolation between adjacent
slots to avoid zipper noise.

The buffer is allocated once at construction; nothing in the read/write path
allocates.
*/

pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Create a line holding `capacity` samples. Capacity is fixed for the
    /// lifetime of the line.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "delay line needs at least two slots");
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Capacity from a duration in seconds.
    pub fn with_duration(seconds: f32, sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        let capacity = ((seconds * sample_rate) as usize).max(2);
        Self::new(capacity)
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    fn clamp_offset(&self, offset: usize) -> usize {
        offset.clamp(1, self.buffer.len() - 1)
    }

    /// Read the sample `offset` slots behind the write cursor.
    #[inline]
    pub fn read(&self, offset: usize) -> f32 {
        let n = self.buffer.len();
        let offset = self.clamp_offset(offset);
        self.buffer[(self.write_pos + n - offset) % n]
    }

    /// Read at a fractional offset with linear interpolation.
    #[inline]
    pub fn read_interpolated(&self, offset: f32) -> f32 {
        let n = self.buffer.len();
        let offset = offset.clamp(1.0, (n - 1) as f32);
        let whole = offset as usize;
        let frac = offset - whole as f32;

        let a = self.buffer[(self.write_pos + n - whole) % n];
        let b = self.buffer[(self.write_pos + n - (whole + 1).min(n - 1)) % n];
        a + (b - a) * frac
    }

    /// Write one sample and advance the write cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Write `sample`, then return the sample delayed by `offset` slots.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, offset: usize) -> f32 {
        self.buffer[self.write_pos] = sample;
        let delayed = {
            let n = self.buffer.len();
            let offset = self.clamp_offset(offset);
            self.buffer[(self.write_pos + n - offset) % n]
        };
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        delayed
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_round_trip() {
        let mut line = DelayLine::new(64);
        let offset = 10;

        // Write an impulse followed by silence; the impulse must come back
        // after exactly `offset` writes and nowhere else.
        let mut outputs = Vec::new();
        outputs.push(line.next_sample(1.0, offset));
        for _ in 0..30 {
            outputs.push(line.next_sample(0.0, offset));
        }

        for (i, &out) in outputs.iter().enumerate() {
            if i == offset {
                assert_eq!(out, 1.0, "impulse expected at {offset}");
            } else {
                assert_eq!(out, 0.0, "unexpected output at {i}: {out}");
            }
        }
    }

    #[test]
    fn offset_is_clamped_into_valid_range() {
        let mut line = DelayLine::new(8);
        for i in 0..8 {
            line.write(i as f32);
        }
        // Offset beyond capacity folds to capacity-1, offset 0 folds to 1
        assert_eq!(line.read(100), line.read(7));
        assert_eq!(line.read(0), line.read(1));
    }

    #[test]
    fn interpolated_read_blends_neighbors() {
        let mut line = DelayLine::new(16);
        line.write(0.0);
        line.write(1.0);
        // write_pos = 2: offset 1 -> 1.0, offset 2 -> 0.0
        let halfway = line.read_interpolated(1.5);
        assert!((halfway - 0.5).abs() < 1e-6, "got {halfway}");
    }

    #[test]
    fn interpolated_read_at_integer_offset_matches_plain_read() {
        let mut line = DelayLine::new(32);
        for i in 0..20 {
            line.write(i as f32 * 0.1);
        }
        for offset in 1..10 {
            let a = line.read(offset);
            let b = line.read_interpolated(offset as f32);
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn reset_silences_the_line() {
        let mut line = DelayLine::new(16);
        for _ in 0..16 {
            line.write(0.7);
        }
        line.reset();
        for offset in 1..16 {
            assert_eq!(line.read(offset), 0.0);
        }
    }
}
