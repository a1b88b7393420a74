use super::amplifier::{Amplifier, MIN_DECIBELS};
use super::filter::Filter;
use super::multimode::MultimodeFilter;
use crate::config::{BandwidthMode, BankConfig, FilterMode, FilterParams, FilterType};
use crate::constants::MAX_BW_PITCH;
use crate::error::{FilterError, Result};

/// Center frequencies of the fixed filter bank's bandpass bands
pub const FIXED_BAND_CENTERS: [f32; 12] = [
    125.0, 175.0, 250.0, 350.0, 500.0, 700.0, 1000.0, 1400.0, 2000.0, 2800.0, 4000.0, 5600.0,
];

const FIXED_LOWPASS_FREQUENCY: f32 = 95.0;
const FIXED_HIGHPASS_FREQUENCY: f32 = 6900.0;
const FIXED_EDGE_POLES: usize = 12;
const FIXED_BAND_POLES: usize = 4;
/// Bandpass width in octaves either side of each center
const FIXED_BAND_OCTAVES: f32 = 0.22;

/// Mixed outputs of one bank sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BankOutput {
    /// Every band
    pub all: f32,
    /// Outer bands plus odd-indexed bands
    pub odd: f32,
    /// Outer bands plus even-indexed bands
    pub even: f32,
}

struct Band {
    filter: MultimodeFilter,
    amplifier: Amplifier,
    level: f32,
}

/// Parallel bank of multimode filters with per-band levels
///
/// Each band filters the same input; outputs are summed into an `all`
/// mix and two interleaved `odd`/`even` mixes that share the outermost
/// bands.
pub struct FilterBank {
    bands: Vec<Band>,
}

impl FilterBank {
    /// Build a bank from band parameters and levels
    ///
    /// # Errors
    /// Returns the first invalid band's validation error, or
    /// `FilterError::Config` for an empty band list or a level outside 0..=1.
    pub fn new(bands: &[(FilterParams, f32)]) -> Result<Self> {
        if bands.is_empty() {
            return Err(FilterError::Config("bank has no bands".to_string()));
        }
        let mut bank = Self {
            bands: Vec::with_capacity(bands.len()),
        };
        for &(params, level) in bands {
            bank.bands.push(Band {
                filter: MultimodeFilter::with_params(params)?,
                amplifier: Amplifier::new(),
                level: 1.0,
            });
            let index = bank.bands.len() - 1;
            bank.set_level(index, level)?;
        }
        log::debug!("Filter bank with {} bands", bank.bands.len());
        Ok(bank)
    }

    /// Build a bank from a TOML layout at the given sample rate
    ///
    /// # Errors
    /// See [`new`](Self::new).
    pub fn from_config(config: &BankConfig, sample_rate: f32) -> Result<Self> {
        let bands: Vec<_> = config
            .bands
            .iter()
            .map(|band| (band.filter.to_params(sample_rate), band.level))
            .collect();
        Self::new(&bands)
    }

    /// Fourteen-band fixed filter bank
    ///
    /// A steep lowpass, twelve narrow bandpass bands spaced roughly half an
    /// octave apart, and a steep highpass.
    ///
    /// # Errors
    /// Returns the validation error if `sample_rate` cannot hold the top band.
    pub fn fixed(sample_rate: f32) -> Result<Self> {
        let edge = |mode, frequency| {
            FilterParams::new(
                sample_rate,
                FilterType::Butterworth,
                FIXED_EDGE_POLES,
                mode,
                frequency,
                0.0,
                BandwidthMode::Linear,
            )
        };

        let mut bands = Vec::with_capacity(FIXED_BAND_CENTERS.len() + 2);
        bands.push((edge(FilterMode::Lowpass, FIXED_LOWPASS_FREQUENCY), 1.0));
        for &center in &FIXED_BAND_CENTERS {
            let params = FilterParams::new(
                sample_rate,
                FilterType::Butterworth,
                FIXED_BAND_POLES,
                FilterMode::Bandpass,
                center,
                FIXED_BAND_OCTAVES / MAX_BW_PITCH,
                BandwidthMode::Pitch,
            );
            bands.push((params, 1.0));
        }
        bands.push((edge(FilterMode::Highpass, FIXED_HIGHPASS_FREQUENCY), 1.0));
        Self::new(&bands)
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Set one band's level, 0 (silent) to 1 (unity)
    ///
    /// # Errors
    /// `FilterError::BandIndex` for a missing band, `FilterError::Config`
    /// for a level outside 0..=1.
    pub fn set_level(&mut self, index: usize, level: f32) -> Result<()> {
        let bands = self.bands.len();
        let band = self
            .bands
            .get_mut(index)
            .ok_or(FilterError::BandIndex { index, bands })?;
        if !(0.0..=1.0).contains(&level) {
            return Err(FilterError::Config(format!(
                "band {} level {} outside 0..=1",
                index, level
            )));
        }
        band.level = level;
        band.amplifier.set_level((1.0 - level) * MIN_DECIBELS);
        Ok(())
    }

    pub fn level(&self, index: usize) -> Option<f32> {
        self.bands.get(index).map(|band| band.level)
    }

    /// Filter parameters of one band
    pub fn params(&self, index: usize) -> Option<&FilterParams> {
        self.bands.get(index).and_then(|band| band.filter.params())
    }

    /// Process one sample through every band
    pub fn process(&mut self, sample: f32) -> BankOutput {
        let last = self.bands.len() - 1;
        let mut out = BankOutput::default();
        for (i, band) in self.bands.iter_mut().enumerate() {
            let y = band.amplifier.process(band.filter.process(sample));
            let outer = i == 0 || i == last;
            out.all += y;
            if outer || i % 2 == 1 {
                out.odd += y;
            }
            if outer || i % 2 == 0 {
                out.even += y;
            }
        }
        out
    }

    pub fn reset(&mut self) {
        for band in &mut self.bands {
            band.filter.reset();
        }
    }
}
