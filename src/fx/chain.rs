use crate::fx::bitcrusher::Bitcrusher;
use crate::fx::chorus::Chorus;
use crate::fx::compressor::Compressor;
use crate::fx::delay::Delay;
use crate::fx::distortion::Distortion;
use crate::fx::eq::ParametricEq;
use crate::fx::phaser::Phaser;
use crate::fx::reverb::Reverb;
use crate::fx::ring_mod::RingModulator;
use crate::fx::wavefolder::Wavefolder;

/*
Effect Chain
============

An ordered list of named slots, each holding one effect unit and an enable
flag. `process` runs the enabled units in insertion order over the same
buffer; disabled slots are skipped without touching their state, so toggling
a delay back on resumes its pending echoes.

The unit set is a closed enum. Dispatch is a plain match, the compiler checks
that every unit answers every chain operation, and downstream code (presets,
the modulation router) can address `(slot name, param name)` pairs without
any runtime type probing.

Slots are added and removed between buffers, never during `process`.
*/

pub enum EffectUnit {
    Delay(Delay),
    Reverb(Reverb),
    Chorus(Chorus),
    Compressor(Compressor),
    ParametricEq(ParametricEq),
    Phaser(Phaser),
    RingModulator(RingModulator),
    Bitcrusher(Bitcrusher),
    Wavefolder(Wavefolder),
    Distortion(Distortion),
}

impl EffectUnit {
    pub fn process(&mut self, buffer: &mut [f32]) {
        match self {
            EffectUnit::Delay(fx) => fx.process(buffer),
            EffectUnit::Reverb(fx) => fx.process(buffer),
            EffectUnit::Chorus(fx) => fx.process(buffer),
            EffectUnit::Compressor(fx) => fx.process(buffer),
            EffectUnit::ParametricEq(fx) => fx.process(buffer),
            EffectUnit::Phaser(fx) => fx.process(buffer),
            EffectUnit::RingModulator(fx) => fx.process(buffer),
            EffectUnit::Bitcrusher(fx) => fx.process(buffer),
            EffectUnit::Wavefolder(fx) => fx.process(buffer),
            EffectUnit::Distortion(fx) => fx.process(buffer),
        }
    }

    pub fn reset(&mut self) {
        match self {
            EffectUnit::Delay(fx) => fx.reset(),
            EffectUnit::Reverb(fx) => fx.reset(),
            EffectUnit::Chorus(fx) => fx.reset(),
            EffectUnit::Compressor(fx) => fx.reset(),
            EffectUnit::ParametricEq(fx) => fx.reset(),
            EffectUnit::Phaser(fx) => fx.reset(),
            EffectUnit::RingModulator(fx) => fx.reset(),
            EffectUnit::Bitcrusher(fx) => fx.reset(),
            EffectUnit::Wavefolder(fx) => fx.reset(),
            EffectUnit::Distortion(fx) => fx.reset(),
        }
    }

    /// Write a parameter by name. Returns false for unknown names; known
    /// names clamp the value per the unit's documented range.
    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match self {
            EffectUnit::Delay(fx) => fx.set_param(name, value),
            EffectUnit::Reverb(fx) => fx.set_param(name, value),
            EffectUnit::Chorus(fx) => fx.set_param(name, value),
            EffectUnit::Compressor(fx) => fx.set_param(name, value),
            EffectUnit::ParametricEq(fx) => fx.set_param(name, value),
            EffectUnit::Phaser(fx) => fx.set_param(name, value),
            EffectUnit::RingModulator(fx) => fx.set_param(name, value),
            EffectUnit::Bitcrusher(fx) => fx.set_param(name, value),
            EffectUnit::Wavefolder(fx) => fx.set_param(name, value),
            EffectUnit::Distortion(fx) => fx.set_param(name, value),
        }
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        match self {
            EffectUnit::Delay(fx) => fx.param(name),
            EffectUnit::Reverb(fx) => fx.param(name),
            EffectUnit::Chorus(fx) => fx.param(name),
            EffectUnit::Compressor(fx) => fx.param(name),
            EffectUnit::ParametricEq(fx) => fx.param(name),
            EffectUnit::Phaser(fx) => fx.param(name),
            EffectUnit::RingModulator(fx) => fx.param(name),
            EffectUnit::Bitcrusher(fx) => fx.param(name),
            EffectUnit::Wavefolder(fx) => fx.param(name),
            EffectUnit::Distortion(fx) => fx.param(name),
        }
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        match self {
            EffectUnit::Delay(fx) => fx.params(),
            EffectUnit::Reverb(fx) => fx.params(),
            EffectUnit::Chorus(fx) => fx.params(),
            EffectUnit::Compressor(fx) => fx.params(),
            EffectUnit::ParametricEq(fx) => fx.params(),
            EffectUnit::Phaser(fx) => fx.params(),
            EffectUnit::RingModulator(fx) => fx.params(),
            EffectUnit::Bitcrusher(fx) => fx.params(),
            EffectUnit::Wavefolder(fx) => fx.params(),
            EffectUnit::Distortion(fx) => fx.params(),
        }
    }
}

struct EffectSlot {
    name: String,
    enabled: bool,
    unit: EffectUnit,
}

#[derive(Default)]
pub struct EffectChain {
    slots: Vec<EffectSlot>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a unit under `name`, enabled. A duplicate name replaces the
    /// existing unit in place, keeping its position and enable flag.
    pub fn add(&mut self, name: &str, unit: EffectUnit) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.name == name) {
            slot.unit = unit;
            return;
        }
        self.slots.push(EffectSlot {
            name: name.to_string(),
            enabled: true,
            unit,
        });
    }

    pub fn remove(&mut self, name: &str) -> Option<EffectUnit> {
        let index = self.slots.iter().position(|s| s.name == name)?;
        Some(self.slots.remove(index).unit)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns false if no slot has that name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.slots.iter_mut().find(|s| s.name == name) {
            Some(slot) => {
                slot.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.name == name && s.enabled)
    }

    pub fn unit(&self, name: &str) -> Option<&EffectUnit> {
        self.slots.iter().find(|s| s.name == name).map(|s| &s.unit)
    }

    pub fn unit_mut(&mut self, name: &str) -> Option<&mut EffectUnit> {
        self.slots
            .iter_mut()
            .find(|s| s.name == name)
            .map(|s| &mut s.unit)
    }

    /// Parameter write addressed by (slot, param). False when either name
    /// is unknown.
    pub fn set_param(&mut self, unit: &str, param: &str, value: f32) -> bool {
        match self.unit_mut(unit) {
            Some(u) => u.set_param(param, value),
            None => false,
        }
    }

    pub fn param(&self, unit: &str, param: &str) -> Option<f32> {
        self.unit(unit)?.param(param)
    }

    /// Run every enabled unit over the buffer, in insertion order.
    pub fn process(&mut self, buffer: &mut [f32]) {
        for slot in self.slots.iter_mut().filter(|s| s.enabled) {
            slot.unit.process(buffer);
        }
    }

    /// Reset every unit's internal state, enabled or not.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.unit.reset();
        }
    }

    /// Visit every slot as (name, enabled, unit).
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool, &EffectUnit)> {
        self.slots
            .iter()
            .map(|s| (s.name.as_str(), s.enabled, &s.unit))
    }
}
