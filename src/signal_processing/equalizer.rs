use super::amplifier::Amplifier;
use super::filter::Filter;
use super::multimode::MultimodeFilter;
use crate::config::{BandwidthMode, FilterMode, FilterParams, FilterType};
use crate::error::{FilterError, Result};

/// Maximum boost per band in dB
pub const EQ_GAIN_DB: f32 = 12.0;

/// Maximum cut per band in dB
pub const EQ_CUT_DB: f32 = -36.0;

const LOW_FREQUENCY: f32 = 200.0;
const MID_FREQUENCY: f32 = 700.0;
/// One octave either side of the mid center
const MID_QBW: f32 = 0.5;
const HIGH_FREQUENCY: f32 = 2500.0;
const BAND_POLES: usize = 4;

/// Three-band equalizer
///
/// Splits the input into a lowpass, a bandpass and a highpass band, scales
/// each by its own level and sums them.
#[derive(Debug, Clone, Default)]
pub struct Equalizer {
    low_amp: Amplifier,
    mid_amp: Amplifier,
    high_amp: Amplifier,
    low_filter: MultimodeFilter,
    mid_filter: MultimodeFilter,
    high_filter: MultimodeFilter,
}

impl Equalizer {
    /// Create an equalizer at the given band levels
    ///
    /// # Errors
    /// See [`set_params`](Self::set_params).
    pub fn new(sample_rate: f32, low_db: f32, mid_db: f32, high_db: f32) -> Result<Self> {
        let mut eq = Self::default();
        eq.set_params(sample_rate, low_db, mid_db, high_db)?;
        Ok(eq)
    }

    /// Set the sample rate and band levels in dB
    ///
    /// # Errors
    /// Returns `FilterError::Config` if a level is outside
    /// `EQ_CUT_DB..=EQ_GAIN_DB`, or the filter validation error for an
    /// unusable sample rate.
    pub fn set_params(&mut self, sample_rate: f32, low_db: f32, mid_db: f32, high_db: f32) -> Result<()> {
        for (name, db) in [("low", low_db), ("mid", mid_db), ("high", high_db)] {
            if !(EQ_CUT_DB..=EQ_GAIN_DB).contains(&db) {
                return Err(FilterError::Config(format!(
                    "{} band level {:.1} dB outside {:.1}..={:.1} dB",
                    name, db, EQ_CUT_DB, EQ_GAIN_DB
                )));
            }
        }

        let band = |mode, frequency, qbw| {
            FilterParams::new(
                sample_rate,
                FilterType::Butterworth,
                BAND_POLES,
                mode,
                frequency,
                qbw,
                BandwidthMode::Pitch,
            )
        };
        self.low_filter
            .try_configure(band(FilterMode::Lowpass, LOW_FREQUENCY, 0.0))?;
        self.mid_filter
            .try_configure(band(FilterMode::Bandpass, MID_FREQUENCY, MID_QBW))?;
        self.high_filter
            .try_configure(band(FilterMode::Highpass, HIGH_FREQUENCY, 0.0))?;

        self.low_amp.set_level(low_db);
        self.mid_amp.set_level(mid_db);
        self.high_amp.set_level(high_db);
        Ok(())
    }
}

impl Filter for Equalizer {
    fn process(&mut self, sample: f32) -> f32 {
        let low = self.low_amp.process(self.low_filter.process(sample));
        let mid = self.mid_amp.process(self.mid_filter.process(sample));
        let high = self.high_amp.process(self.high_filter.process(sample));
        low + mid + high
    }

    fn reset(&mut self) {
        self.low_filter.reset();
        self.mid_filter.reset();
        self.high_filter.reset();
    }
}
