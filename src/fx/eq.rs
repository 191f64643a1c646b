use crate::dsp::biquad::BiquadFilter;

/*
Parametric EQ
=============

An ordered list of biquad bands run in series; each band is a full
`BiquadFilter`, so the EQ inherits the cookbook responses and the clamped
parameter ranges. The default layout is the classic three-band console strip:

    band 0: low shelf  @ 100 Hz
    band 1: peak       @ 1 kHz, Q 1.0
    band 2: high shelf @ 8 kHz

Bands can be appended or removed at the tail, which is enough for the preset
and automation surfaces; anything fancier goes through `band_mut` directly.

The string parameter surface maps onto the three default bands (`low_gain`,
`mid_gain`, `mid_freq`, ...); it answers false/None when the addressed band
has been removed.
*/

pub struct ParametricEq {
    bands: Vec<BiquadFilter>,
    sample_rate: f32,
}

impl ParametricEq {
    /// Three-band default: low shelf, mid peak, high shelf.
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            bands: vec![
                BiquadFilter::low_shelf(100.0, 0.0, sample_rate),
                BiquadFilter::peak(1_000.0, 1.0, 0.0, sample_rate),
                BiquadFilter::high_shelf(8_000.0, 0.0, sample_rate),
            ],
            sample_rate,
        }
    }

    /// Empty EQ to be populated with `add_band`.
    pub fn empty(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            bands: Vec::new(),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn add_band(&mut self, band: BiquadFilter) {
        self.bands.push(band);
    }

    /// Remove the band at `index`, keeping the remaining order.
    pub fn remove_band(&mut self, index: usize) -> Option<BiquadFilter> {
        if index < self.bands.len() {
            Some(self.bands.remove(index))
        } else {
            None
        }
    }

    pub fn band_mut(&mut self, index: usize) -> Option<&mut BiquadFilter> {
        self.bands.get_mut(index)
    }

    pub fn band(&self, index: usize) -> Option<&BiquadFilter> {
        self.bands.get(index)
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        self.bands
            .iter_mut()
            .fold(sample, |s, band| band.process(s))
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Clear every band's history. Coefficients are untouched.
    pub fn reset(&mut self) {
        for band in &mut self.bands {
            band.reset();
        }
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        let (index, apply): (usize, fn(&mut BiquadFilter, f32)) = match name {
            "low_gain" => (0, BiquadFilter::set_gain_db),
            "low_freq" => (0, BiquadFilter::set_cutoff),
            "mid_gain" => (1, BiquadFilter::set_gain_db),
            "mid_freq" => (1, BiquadFilter::set_cutoff),
            "mid_q" => (1, BiquadFilter::set_q),
            "high_gain" => (2, BiquadFilter::set_gain_db),
            "high_freq" => (2, BiquadFilter::set_cutoff),
            _ => return false,
        };
        match self.bands.get_mut(index) {
            Some(band) => {
                apply(band, value);
                true
            }
            None => false,
        }
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        let (index, read): (usize, fn(&BiquadFilter) -> f32) = match name {
            "low_gain" => (0, BiquadFilter::gain_db),
            "low_freq" => (0, BiquadFilter::cutoff),
            "mid_gain" => (1, BiquadFilter::gain_db),
            "mid_freq" => (1, BiquadFilter::cutoff),
            "mid_q" => (1, BiquadFilter::q),
            "high_gain" => (2, BiquadFilter::gain_db),
            "high_freq" => (2, BiquadFilter::cutoff),
            _ => return None,
        };
        self.bands.get(index).map(read)
    }

    pub fn params(&self) -> Vec<(&'static str, f32)> {
        [
            "low_gain", "low_freq", "mid_gain", "mid_freq", "mid_q", "high_gain", "high_freq",
        ]
        .iter()
        .filter_map(|&name| self.param(name).map(|v| (name, v)))
        .collect()
    }
}
