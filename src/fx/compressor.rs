/*
Compressor
==========

Feed-forward dynamics compressor working in the dB domain. Per sample:

  1. |x| -> dB (floored at -100 dB so silence never reads as signal)
  2. one-pole envelope follower; a rising level uses the attack coefficient,
     a falling one the release coefficient:
         env = coeff*env + (1 - coeff)*level
         coeff = exp(-1 / (ms/1000 * sr))
  3. gain reduction from the *smoothed* envelope against the threshold with
     a soft knee:
         level < thr - knee/2          -> 0
         level > thr + knee/2          -> (level - thr)*(1 - 1/ratio)
         inside the knee               -> pos*over*(1 - 1/ratio)/2
     where pos = (level - knee_start)/knee and over = level - knee_start.
     The middle branch meets 0 at the knee start and the full-ratio line at
     the knee end, so the transfer curve has no jumps.
  4. linear gain 10^((-reduction + makeup)/20) applied to the raw sample.

The envelope state persists across blocks; reset() drops it back to the
floor so a reused compressor does not open with a stale envelope.
*/

const ENVELOPE_FLOOR_DB: f32 = -100.0;

pub struct Compressor {
    sample_rate: f32,

    threshold_db: f32,   // -60 .. 0
    ratio: f32,          // 1 .. 20
    attack_ms: f32,      // 0.1 .. 100
    release_ms: f32,     // 10 .. 1000
    makeup_gain_db: f32, // 0 .. 24
    knee_db: f32,        // 0 .. 24

    envelope_db: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl Compressor {
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        let mut comp = Self {
            sample_rate,
            threshold_db: -20.0,
            ratio: 4.0,
            attack_ms: 10.0,
            release_ms: 100.0,
            makeup_gain_db: 0.0,
            knee_db: 6.0,
            envelope_db: ENVELOPE_FLOOR_DB,
            attack_coeff: 0.0,
            release_coeff: 0.0,
        };
        comp.recompute_coefficients();
        comp
    }

    fn recompute_coefficients(&mut self) {
        self.attack_coeff = (-1.0 / (self.attack_ms / 1000.0 * self.sample_rate)).exp();
        self.release_coeff = (-1.0 / (self.release_ms / 1000.0 * self.sample_rate)).exp();
    }

    pub fn set_threshold(&mut self, threshold_db: f32) {
        self.threshold_db = threshold_db.clamp(-60.0, 0.0);
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.clamp(1.0, 20.0);
    }

    pub fn set_attack(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms.clamp(0.1, 100.0);
        self.recompute_coefficients();
    }

    pub fn set_release(&mut self, release_ms: f32) {
        self.release_ms = release_ms.clamp(10.0, 1_000.0);
        self.recompute_coefficients();
    }

    pub fn set_makeup_gain(&mut self, gain_db: f32) {
        self.makeup_gain_db = gain_db.clamp(0.0, 24.0);
    }

    pub fn set_knee(&mut self, knee_db: f32) {
        self.knee_db = knee_db.clamp(0.0, 24.0);
    }

    pub fn threshold(&self) -> f32 {
        self.threshold_db
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    fn linear_to_db(linear: f32) -> f32 {
        if linear < 1e-10 {
            ENVELOPE_FLOOR_DB
        } else {
            20.0 * linear.log10()
        }
    }

    fn db_to_linear(db: f32) -> f32 {
        10f32.powf(db / 20.0)
    }

    /// Gain reduction in dB for a given envelope level.
    fn gain_reduction_db(&self, level_db: f32) -> f32 {
        let slope = 1.0 - 1.0 / self.ratio;
        let knee_start = self.threshold_db - self.knee_db / 2.0;
        let knee_end = self.threshold_db + self.knee_db / 2.0;

        if level_db <= knee_start || self.knee_db <= 0.0 {
            if level_db > self.threshold_db {
                (level_db - self.threshold_db) * slope
            } else {
                0.0
            }
        } else if level_db >= knee_end {
            (level_db - self.threshold_db) * slope
        } else {
            let pos = (level_db - knee_start) / self.knee_db;
            let over = level_db - knee_start;
            pos * over * slope / 2.0
        }
    }

    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        let level_db = Self::linear_to_db(sample.abs());

        let coeff = if level_db > self.envelope_db {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope_db = coeff * self.envelope_db + (1.0 - coeff) * level_db;

        let reduction = self.gain_reduction_db(self.envelope_db);
        sample * Self::db_to_linear(-reduction + self.makeup_gain_db)
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.envelope_db = ENVELOPE_FLOOR_DB;
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match name {
            "threshold" => self.set_threshold(value),
            "ratio" => self.set_ratio(value),
            "attack" => self.set_attack(value),
            "release" => self.set_release(value),
            "makeup" => self.set_makeup_gain(value),
            "knee" => self.set_knee(value),
            _ => return false,
        }
        true
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match name {
            "threshold" => Some(self.threshold_db),
            "ratio" => Some(self.ratio),
            "attack" => Some(self.attack_ms),
            "release" => Some(self.release_ms),
            "makeup" => Some(self.makeup_gain_db),
            "knee" => Some(self.knee_db),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        vec![
            ("threshold", self.threshold_db),
            ("ratio", self.ratio),
            ("attack", self.attack_ms),
            ("release", self.release_ms),
            ("makeup", self.makeup_gain_db),
            ("knee", self.knee_db),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn below_threshold_passes_unchanged() {
        let mut comp = Compressor::new(SAMPLE_RATE);
        comp.set_threshold(-10.0);
        comp.set_knee(0.0);

        // -40 dB sine, far below threshold
        let amp = 0.01;
        let mut buffer: Vec<f32> = (0..4_096)
            .map(|i| amp * (i as f32 * 0.05).sin())
            .collect();
        let before = rms(&buffer);
        comp.process(&mut buffer);

        assert!((rms(&buffer) - before).abs() / before < 0.01);
    }

    #[test]
    fn above_threshold_is_attenuated() {
        let mut comp = Compressor::new(SAMPLE_RATE);
        comp.set_threshold(-20.0);
        comp.set_ratio(8.0);
        comp.set_attack(0.1);
        comp.set_knee(0.0);

        // Full-scale sine: 0 dB peaks against a -20 dB threshold
        let mut buffer: Vec<f32> = (0..8_192).map(|i| (i as f32 * 0.05).sin()).collect();
        let before = rms(&buffer);
        comp.process(&mut buffer);
        let after = rms(&buffer);

        // Second half, after the envelope has settled
        assert!(
            after < before * 0.5,
            "expected strong attenuation: {before} -> {after}"
        );
    }

    #[test]
    fn knee_curve_is_continuous_at_both_edges() {
        let mut comp = Compressor::new(SAMPLE_RATE);
        comp.set_threshold(-20.0);
        comp.set_ratio(4.0);
        comp.set_knee(6.0);

        let eps = 1e-3;
        // knee start: -23 dB, knee end: -17 dB
        let below = comp.gain_reduction_db(-23.0 - eps);
        let at_start = comp.gain_reduction_db(-23.0 + eps);
        assert!((below - at_start).abs() < 0.01);

        let at_end = comp.gain_reduction_db(-17.0 - eps);
        let above = comp.gain_reduction_db(-17.0 + eps);
        assert!((at_end - above).abs() < 0.01);
    }

    #[test]
    fn steady_state_reduction_follows_the_ratio() {
        let mut comp = Compressor::new(SAMPLE_RATE);
        comp.set_threshold(-20.0);
        comp.set_ratio(4.0);
        comp.set_attack(0.1);
        comp.set_knee(0.0);

        // Constant 0.5 input: level = -6.02 dB, 13.98 dB over threshold.
        // Settled reduction is over * (1 - 1/ratio) dB.
        let mut buffer = vec![0.5f32; 4_096];
        comp.process(&mut buffer);

        let level_db = 20.0 * 0.5f32.log10();
        let expected_reduction = (level_db - (-20.0)) * (1.0 - 1.0 / 4.0);
        let expected = 0.5 * 10f32.powf(-expected_reduction / 20.0);
        let settled = buffer[buffer.len() - 1];
        assert!(
            (settled - expected).abs() < 1e-3,
            "expected {expected}, got {settled}"
        );
    }

    #[test]
    fn makeup_gain_boosts_output() {
        let mut comp = Compressor::new(SAMPLE_RATE);
        comp.set_threshold(0.0); // nothing to compress
        comp.set_makeup_gain(6.0);

        let mut buffer = vec![0.1f32; 256];
        comp.process(&mut buffer);

        // +6 dB is a factor of ~2
        assert!((buffer[255] / 0.1 - 1.995).abs() < 0.05);
    }

    #[test]
    fn silence_stays_silent() {
        let mut comp = Compressor::new(SAMPLE_RATE);
        let mut buffer = vec![0.0f32; 512];
        comp.process(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
