use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::Waveform;
use crate::engine::VoiceEngine;
use crate::fx::EffectChain;

/*
Presets
=======

A preset is a flat, namespaced name -> value map plus the oscillator
waveform:

    osc.frequency       filter.cutoff      env.attack      volume
                        filter.resonance   env.decay
                        filter.gain_db     env.sustain
                                           env.release

and `<slot>.<param>` for every unit in the effect chain (e.g.
`echo.feedback`). A BTreeMap keeps snapshots deterministically ordered, so
two snapshots of the same state serialize identically.

Applying is forgiving by design: unknown keys are skipped, values pass
through the module setters and get clamped there, and chain keys whose slot
does not exist in the receiving chain are ignored. A preset saved with a
richer chain still applies cleanly to a smaller one.
*/

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Preset {
    pub name: String,
    pub waveform: Waveform,
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Snapshot the live engine and chain state.
    pub fn capture(name: &str, engine: &VoiceEngine, chain: &EffectChain) -> Self {
        let mut params = BTreeMap::new();

        params.insert("osc.frequency".into(), engine.oscillator().frequency());
        params.insert("filter.cutoff".into(), engine.filter().cutoff());
        params.insert("filter.resonance".into(), engine.filter().q());
        params.insert("filter.gain_db".into(), engine.filter().gain_db());
        params.insert("env.attack".into(), engine.envelope().attack());
        params.insert("env.decay".into(), engine.envelope().decay());
        params.insert("env.sustain".into(), engine.envelope().sustain());
        params.insert("env.release".into(), engine.envelope().release_time());
        params.insert("volume".into(), engine.volume());

        for (slot, _, unit) in chain.iter() {
            for (param, value) in unit.params() {
                params.insert(format!("{slot}.{param}"), value);
            }
        }

        Self {
            name: name.to_string(),
            waveform: engine.oscillator().waveform(),
            params,
        }
    }

    /// Apply to an engine and chain. Values clamp in the module setters;
    /// keys with no matching parameter are ignored.
    pub fn apply(&self, engine: &mut VoiceEngine, chain: &mut EffectChain) {
        engine.oscillator_mut().set_waveform(self.waveform);

        for (key, &value) in &self.params {
            match key.as_str() {
                "osc.frequency" => engine.oscillator_mut().set_frequency(value),
                "filter.cutoff" => engine.filter_mut().set_cutoff(value),
                "filter.resonance" => engine.filter_mut().set_q(value),
                "filter.gain_db" => engine.filter_mut().set_gain_db(value),
                "env.attack" => engine.envelope_mut().set_attack(value),
                "env.decay" => engine.envelope_mut().set_decay(value),
                "env.sustain" => engine.envelope_mut().set_sustain(value),
                "env.release" => engine.envelope_mut().set_release(value),
                "volume" => engine.set_volume(value),
                other => {
                    if let Some((slot, param)) = other.split_once('.') {
                        chain.set_param(slot, param, value);
                    }
                }
            }
        }
    }
}
