use crate::dsp::oscillator::Lfo;
use crate::engine::VoiceEngine;
use crate::fx::EffectChain;

/*
Modulation Router
=================

Maps modulation sources onto parameter setters, once per rendered block.
Two source kinds:

  * LFO routes: the LFO is read at block rate and its value scales a base
    captured when the router was started.
      relative: value = base + base*depth*0.5*lfo      (pitch-style)
      span:     value = base + (max-min)*depth*lfo     (cutoff-style)
    The result is clamped to the target's documented range before the
    setter runs, so a deep route cannot push a parameter out of bounds.

  * Automation lanes: sorted (time, value) keyframes, linearly interpolated
    at the router's transport time. The value holds constant before the
    first and after the last keyframe; a looping lane wraps the transport
    time at its final keyframe.

`start` snapshots each route's base from the live engine/chain and resets
the transport. Routes registered after `start` capture their base on the
first tick that sees them, so late routes modulate around the value the
parameter had when they arrived rather than being silently skipped.

A route or lane addressing a chain slot that has been removed is dropped on
the tick that discovers it; `route_count`/`lane_count` make that visible.

The router itself lives on the render thread next to the engine, so its
route/lane lists are never touched from two threads. A control thread
registers and removes routes by pushing [`RouterCommand`]s through a queue
(same wait-free SPSC pattern as the engine's message queue); the render
side drains it at the top of `process_block_with`, before modulation is
applied. Commands that carry heap data (an LFO, a keyframe list) allocate
on the control side; the render side only moves them.
*/

/// A parameter the router can drive. Closed set: engine parameters by
/// variant, chain parameters by (slot, param) name pair.
#[derive(Debug, Clone, PartialEq)]
pub enum ModTarget {
    OscFrequency,
    FilterCutoff,
    FilterResonance,
    Volume,
    EffectParam { unit: String, param: String },
}

impl ModTarget {
    /// Valid output range the router clamps to before calling the setter.
    /// Chain targets rely on the unit's own setter clamps instead.
    fn range(&self) -> Option<(f32, f32)> {
        match self {
            ModTarget::OscFrequency => Some((20.0, 20_000.0)),
            ModTarget::FilterCutoff => Some((20.0, 20_000.0)),
            ModTarget::FilterResonance => Some((0.1, 20.0)),
            ModTarget::Volume => Some((0.0, 1.0)),
            ModTarget::EffectParam { .. } => None,
        }
    }
}

/// How an LFO value maps onto the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModScaling {
    /// Proportional to the captured base; suits frequency-like targets
    /// where depth means "fraction of the current value".
    Relative,
    /// Sweep across an absolute span; suits cutoff-like targets where the
    /// musical range is fixed regardless of the base.
    Span { min: f32, max: f32 },
}

/// Control-thread instruction for the router, delivered over a queue and
/// applied on the render thread between blocks.
pub enum RouterCommand {
    AddLfoRoute {
        lfo: Lfo,
        target: ModTarget,
        depth: f32,
        scaling: ModScaling,
    },
    AddLane {
        target: ModTarget,
        keyframes: Vec<(f32, f32)>,
        looping: bool,
    },
    /// Remove every route driving the target.
    RemoveRoutes(ModTarget),
    /// Remove every lane driving the target.
    RemoveLanes(ModTarget),
    Start,
    Stop,
}

/// Source of pending router commands, drained before modulation is applied.
///
/// Mirrors the engine's message receiver: the trait keeps the router free of
/// a hard `rtrb` dependency so the feature can be disabled.
pub trait CommandReceiver {
    fn pop(&mut self) -> Option<RouterCommand>;
}

#[cfg(feature = "rtrb")]
impl CommandReceiver for rtrb::Consumer<RouterCommand> {
    fn pop(&mut self) -> Option<RouterCommand> {
        rtrb::Consumer::pop(self).ok()
    }
}

impl CommandReceiver for std::collections::VecDeque<RouterCommand> {
    fn pop(&mut self) -> Option<RouterCommand> {
        self.pop_front()
    }
}

struct LfoRoute {
    lfo: Lfo,
    target: ModTarget,
    depth: f32,
    scaling: ModScaling,
    base: Option<f32>, // captured at start(), or first tick after
}

struct AutomationLane {
    target: ModTarget,
    keyframes: Vec<(f32, f32)>, // (seconds, value), sorted by time
    looping: bool,
}

impl AutomationLane {
    fn value_at(&self, time: f32) -> Option<f32> {
        let first = self.keyframes.first()?;
        let last = *self.keyframes.last()?;

        let time = if self.looping && last.0 > 0.0 {
            time % last.0
        } else {
            time
        };

        if time <= first.0 {
            return Some(first.1);
        }
        if time >= last.0 {
            return Some(last.1);
        }

        let after = self
            .keyframes
            .iter()
            .position(|&(t, _)| t > time)
            .unwrap_or(self.keyframes.len() - 1);
        let (t0, v0) = self.keyframes[after - 1];
        let (t1, v1) = self.keyframes[after];

        let progress = (time - t0) / (t1 - t0);
        Some(v0 + (v1 - v0) * progress)
    }
}

pub struct ModulationRouter {
    sample_rate: f32,
    routes: Vec<LfoRoute>,
    lanes: Vec<AutomationLane>,
    started: bool,
    elapsed_samples: u64,
}

impl ModulationRouter {
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            sample_rate,
            routes: Vec::new(),
            lanes: Vec::new(),
            started: false,
            elapsed_samples: 0,
        }
    }

    /// Register an LFO route. Depth is clamped to [0, 1]. The base value is
    /// captured at `start()`, or on the next tick if the router is already
    /// running.
    pub fn add_lfo_route(&mut self, lfo: Lfo, target: ModTarget, depth: f32, scaling: ModScaling) {
        self.routes.push(LfoRoute {
            lfo,
            target,
            depth: depth.clamp(0.0, 1.0),
            scaling,
            base: None,
        });
    }

    /// Register an automation lane. Keyframes are sorted by time; a lane
    /// without keyframes is ignored and dropped on the first tick.
    pub fn add_lane(&mut self, target: ModTarget, mut keyframes: Vec<(f32, f32)>, looping: bool) {
        keyframes.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.lanes.push(AutomationLane {
            target,
            keyframes,
            looping,
        });
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Transport position in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_samples as f32 / self.sample_rate
    }

    /// Arm every route against the current engine/chain state and reset
    /// the transport.
    pub fn start(&mut self, engine: &VoiceEngine, chain: &EffectChain) {
        for route in &mut self.routes {
            route.base = read_target(engine, chain, &route.target);
        }
        self.elapsed_samples = 0;
        self.started = true;
    }

    /// Stop applying modulation. Bases are discarded so a later `start()`
    /// re-captures current values.
    pub fn stop(&mut self) {
        self.started = false;
        for route in &mut self.routes {
            route.base = None;
        }
    }

    /// Apply one control-thread command. `Start` arms lazily: bases are
    /// cleared and re-captured on the next tick, which runs on the render
    /// thread with the live engine state in hand.
    pub fn apply_command(&mut self, command: RouterCommand) {
        match command {
            RouterCommand::AddLfoRoute {
                lfo,
                target,
                depth,
                scaling,
            } => self.add_lfo_route(lfo, target, depth, scaling),
            RouterCommand::AddLane {
                target,
                keyframes,
                looping,
            } => self.add_lane(target, keyframes, looping),
            RouterCommand::RemoveRoutes(target) => {
                self.routes.retain(|r| r.target != target);
            }
            RouterCommand::RemoveLanes(target) => {
                self.lanes.retain(|l| l.target != target);
            }
            RouterCommand::Start => {
                for route in &mut self.routes {
                    route.base = None;
                }
                self.elapsed_samples = 0;
                self.started = true;
            }
            RouterCommand::Stop => self.stop(),
        }
    }

    /// Drain every pending command, in push order.
    pub fn drain_commands<R: CommandReceiver>(&mut self, rx: &mut R) {
        while let Some(command) = rx.pop() {
            self.apply_command(command);
        }
    }

    /// Render-thread entry point: drain the command queue, then apply
    /// modulation for one block.
    pub fn process_block_with<R: CommandReceiver>(
        &mut self,
        rx: &mut R,
        engine: &mut VoiceEngine,
        chain: &mut EffectChain,
        block_len: usize,
    ) {
        self.drain_commands(rx);
        self.process_block(engine, chain, block_len);
    }

    /// Apply every route and lane once, then advance the transport by
    /// `block_len` samples. Call once per rendered block, before the block
    /// is rendered. No-op unless started.
    pub fn process_block(
        &mut self,
        engine: &mut VoiceEngine,
        chain: &mut EffectChain,
        block_len: usize,
    ) {
        if !self.started {
            return;
        }

        let block_len = block_len.min(crate::MAX_BLOCK_SIZE);

        self.routes.retain_mut(|route| {
            // Late registration: capture the base on first sight
            if route.base.is_none() {
                route.base = read_target(engine, chain, &route.target);
            }
            let Some(base) = route.base else {
                return false; // target gone before it was ever armed
            };

            let lfo_value = route.lfo.value();
            route.lfo.advance(block_len);

            let mut value = match route.scaling {
                ModScaling::Relative => base + base * route.depth * 0.5 * lfo_value,
                ModScaling::Span { min, max } => base + (max - min) * route.depth * lfo_value,
            };
            if let ModScaling::Span { min, max } = route.scaling {
                value = value.clamp(min.min(max), max.max(min));
            }
            if let Some((lo, hi)) = route.target.range() {
                value = value.clamp(lo, hi);
            }

            set_target(engine, chain, &route.target, value)
        });

        let time = self.elapsed();
        self.lanes.retain_mut(|lane| {
            let Some(value) = lane.value_at(time) else {
                return false; // empty lane
            };
            let value = match lane.target.range() {
                Some((lo, hi)) => value.clamp(lo, hi),
                None => value,
            };
            set_target(engine, chain, &lane.target, value)
        });

        self.elapsed_samples += block_len as u64;
    }
}

fn read_target(engine: &VoiceEngine, chain: &EffectChain, target: &ModTarget) -> Option<f32> {
    match target {
        ModTarget::OscFrequency => Some(engine.oscillator().frequency()),
        ModTarget::FilterCutoff => Some(engine.filter().cutoff()),
        ModTarget::FilterResonance => Some(engine.filter().q()),
        ModTarget::Volume => Some(engine.volume()),
        ModTarget::EffectParam { unit, param } => chain.param(unit, param),
    }
}

fn set_target(
    engine: &mut VoiceEngine,
    chain: &mut EffectChain,
    target: &ModTarget,
    value: f32,
) -> bool {
    match target {
        ModTarget::OscFrequency => {
            engine.oscillator_mut().set_frequency(value);
            true
        }
        ModTarget::FilterCutoff => {
            engine.filter_mut().set_cutoff(value);
            true
        }
        ModTarget::FilterResonance => {
            engine.filter_mut().set_q(value);
            true
        }
        ModTarget::Volume => {
            engine.set_volume(value);
            true
        }
        ModTarget::EffectParam { unit, param } => chain.set_param(unit, param, value),
    }
}
