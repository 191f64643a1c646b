use crate::MIN_TIME;

/*
ADSR Envelope
=============

Linear attack/decay/sustain/release envelope producing a gain multiplier in
[0.0, 1.0]. A state machine governs the stages; transitions are time-driven
(elapsed seconds compared against the stage duration) except for trigger()
and release(), which force a stage and reset the elapsed clock.

    Idle --trigger()--> Attack --(elapsed>=attack)--> Decay
    Decay --(elapsed>=decay)--> Sustain
    Sustain --release()--> Release --(elapsed>=release)--> Idle
    (Attack|Decay|Sustain) --release()--> Release
    trigger() from ANY stage --> Attack, level reset to 0

The retrigger is hard: trigger() mid-decay or mid-sustain restarts from zero
rather than ramping from the current level. Repeated notes sound distinct at
the cost of a step when retriggering a still-sounding voice.

Release always ramps from the level snapshotted at release() time, so a note
released mid-attack fades from wherever it got to instead of jumping to the
sustain level first.

Stage durations are clamped to a minimum of one sample's worth of time, which
makes a zero or negative duration behave as "instantaneous": the stage
completes within the first sample processed.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    attack_time: f32,   // seconds to ramp 0 -> 1
    decay_time: f32,    // seconds to ramp 1 -> sustain
    sustain_level: f32, // held level (0.0 - 1.0)
    release_time: f32,  // seconds to ramp current -> 0
    sample_rate: f32,

    stage: EnvelopeState,
    level: f32,
    elapsed: f32,             // seconds spent in the current stage
    release_start_level: f32, // level when release() was called
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self::adsr(0.01, 0.2, 0.7, 0.3, sample_rate)
    }

    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32, sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),
            sample_rate,
            stage: EnvelopeState::Idle,
            level: 0.0,
            elapsed: 0.0,
            release_start_level: 0.0,
        }
    }

    pub fn set_attack(&mut self, seconds: f32) {
        self.attack_time = seconds.max(MIN_TIME);
    }

    pub fn set_decay(&mut self, seconds: f32) {
        self.decay_time = seconds.max(MIN_TIME);
    }

    pub fn set_sustain(&mut self, level: f32) {
        self.sustain_level = level.clamp(0.0, 1.0);
    }

    pub fn set_release(&mut self, seconds: f32) {
        self.release_time = seconds.max(MIN_TIME);
    }

    pub fn attack(&self) -> f32 {
        self.attack_time
    }

    pub fn decay(&self) -> f32 {
        self.decay_time
    }

    pub fn sustain(&self) -> f32 {
        self.sustain_level
    }

    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    /// Gate high: restart the attack stage from zero, from any stage.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeState::Attack;
        self.level = 0.0;
        self.elapsed = 0.0;
    }

    /// Gate low: ramp down from the current level.
    pub fn release(&mut self) {
        if self.stage == EnvelopeState::Idle {
            return;
        }
        self.release_start_level = self.level;
        self.elapsed = 0.0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance one sample and return the new gain level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let dt = 1.0 / self.sample_rate;

        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }
            EnvelopeState::Attack => {
                self.elapsed += dt;
                if self.elapsed >= self.attack_time {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                    self.elapsed = 0.0;
                } else {
                    self.level = self.elapsed / self.attack_time;
                }
            }
            EnvelopeState::Decay => {
                self.elapsed += dt;
                if self.elapsed >= self.decay_time {
                    self.level = self.sustain_level;
                    self.stage = EnvelopeState::Sustain;
                    self.elapsed = 0.0;
                } else {
                    let progress = self.elapsed / self.decay_time;
                    self.level = 1.0 - (1.0 - self.sustain_level) * progress;
                }
            }
            EnvelopeState::Sustain => {
                self.level = self.sustain_level;
            }
            EnvelopeState::Release => {
                self.elapsed += dt;
                if self.elapsed >= self.release_time {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                } else {
                    let progress = self.elapsed / self.release_time;
                    self.level = self.release_start_level * (1.0 - progress);
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of gain values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// True while the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }

    /// Force idle with level 0 without ramping.
    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.elapsed = 0.0;
        self.release_start_level = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn advance(env: &mut Envelope, samples: usize) {
        for _ in 0..samples {
            env.next_sample();
        }
    }

    #[test]
    fn attack_reaches_full_level_on_time() {
        let mut env = Envelope::adsr(0.01, 0.1, 0.7, 0.2, SAMPLE_RATE);
        env.trigger();
        advance(&mut env, (0.01 * SAMPLE_RATE) as usize);

        assert!(env.level() > 0.99, "level after attack: {}", env.level());

        // One more sample must leave the attack stage behind
        env.next_sample();
        assert_ne!(env.state(), EnvelopeState::Attack);
    }

    #[test]
    fn decay_settles_at_sustain() {
        let sustain = 0.6;
        let mut env = Envelope::adsr(0.01, 0.05, sustain, 0.2, SAMPLE_RATE);
        env.trigger();
        advance(&mut env, ((0.01 + 0.05) * SAMPLE_RATE) as usize + 5);

        assert_eq!(env.state(), EnvelopeState::Sustain);
        assert!((env.level() - sustain).abs() < 0.01);
    }

    #[test]
    fn release_from_sustain_reaches_idle() {
        let release = 0.03;
        let mut env = Envelope::adsr(0.01, 0.02, 0.5, release, SAMPLE_RATE);
        env.trigger();
        advance(&mut env, (0.05 * SAMPLE_RATE) as usize);
        assert_eq!(env.state(), EnvelopeState::Sustain);

        env.release();
        advance(&mut env, (release * SAMPLE_RATE) as usize + 1);

        assert!(env.level() <= 1e-6, "level after release: {}", env.level());
        assert_eq!(env.state(), EnvelopeState::Idle);
    }

    #[test]
    fn release_mid_attack_ramps_from_current_level() {
        let mut env = Envelope::adsr(0.1, 0.1, 0.7, 0.05, SAMPLE_RATE);
        env.trigger();
        advance(&mut env, (0.05 * SAMPLE_RATE) as usize); // halfway up

        let mid = env.level();
        assert!(mid > 0.3 && mid < 0.7, "mid-attack level: {mid}");

        env.release();
        let first = env.next_sample();
        assert!(first <= mid, "release must not jump upward: {mid} -> {first}");
        assert!(first > mid * 0.9, "release must start near current level");
    }

    #[test]
    fn trigger_is_a_hard_retrigger() {
        let mut env = Envelope::adsr(0.01, 0.02, 0.8, 0.1, SAMPLE_RATE);
        env.trigger();
        advance(&mut env, (0.05 * SAMPLE_RATE) as usize);
        assert!(env.level() > 0.5);

        env.trigger();
        assert_eq!(env.level(), 0.0);
        assert_eq!(env.state(), EnvelopeState::Attack);
    }

    #[test]
    fn zero_durations_are_instantaneous() {
        let mut env = Envelope::adsr(0.0, 0.0, 0.5, 0.0, SAMPLE_RATE);
        env.trigger();
        // One sample is enough to pass through attack
        env.next_sample();
        assert!(env.level() >= 0.5);

        advance(&mut env, 2);
        env.release();
        env.next_sample();
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn level_always_in_unit_range() {
        let mut env = Envelope::adsr(0.003, 0.004, 0.3, 0.005, SAMPLE_RATE);
        env.trigger();
        for i in 0..200 {
            let level = env.next_sample();
            assert!((0.0..=1.0).contains(&level), "sample {i}: {level}");
            if i == 50 {
                env.release();
            }
            if i == 100 {
                env.trigger();
            }
        }
    }
}
