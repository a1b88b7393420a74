//! Configuration for the multimode filter engine.
//!
//! [`FilterParams`] is the snapshot handed to
//! [`MultimodeFilter::configure`](crate::signal_processing::MultimodeFilter::configure).
//! [`FilterConfig`] and [`BankConfig`] are the serde-facing forms used by
//! TOML files and the command line tools; they carry no sample rate, which
//! is supplied by the audio source.
//!
//! ## Bank files
//!
//! ```toml
//! [[bands]]
//! filter_type = "butterworth"
//! mode = "bandpass"
//! poles = 4
//! frequency = "1khz"
//! qbw = 0.11
//! bandwidth_mode = "pitch"
//! level = 0.8
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{
    MAX_FREQUENCY, MAX_POLES, MAX_QBW, MIN_BAND_SEPARATION, MIN_FREQUENCY, MIN_POLES, MIN_QBW,
    NYQUIST_RATIO, POLE_STEP,
};
use crate::error::{FilterError, Result};

/// Analog prototype family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Maximally flat passband
    Butterworth,
    /// Equiripple passband, steeper transition
    Chebyshev,
}

/// Response shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Lowpass,
    Highpass,
    Bandpass,
    Bandreject,
}

impl FilterMode {
    /// True for the two modes whose width is set by a band around the corner.
    pub fn is_band(self) -> bool {
        matches!(self, Self::Bandpass | Self::Bandreject)
    }
}

/// How `qbw` is interpreted as a band width in band modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BandwidthMode {
    /// Width in Hz, scaled from `MAX_BW_LINEAR`
    #[default]
    Linear,
    /// Width in octaves either side of the corner, scaled from `MAX_BW_PITCH`
    Pitch,
}

/// Frequency in Hz, parseable from strings with an optional unit
///
/// # Parsing formats
/// - `1000` - Hz (no suffix)
/// - `1000hz` or `1000Hz` - Hz (explicit)
/// - `1.5k`, `1.5khz` or `1.5kHz` - kilohertz
///
/// # Example
/// ```
/// use multimode::config::Frequency;
///
/// let freq: Frequency = "1.5khz".parse().unwrap();
/// assert!((freq.as_hz() - 1500.0).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency(f32);

impl Frequency {
    pub fn from_hz(hz: f32) -> Self {
        Self(hz)
    }

    pub fn as_hz(&self) -> f32 {
        self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        let (num, scale) = if let Some(num) = lower.strip_suffix("khz") {
            (num, 1000.0)
        } else if let Some(num) = lower.strip_suffix('k') {
            (num, 1000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let value: f32 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", s))?;
        if !value.is_finite() || value <= 0.0 {
            return Err("frequency must be positive".to_string());
        }
        Ok(Self::from_hz(value * scale))
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(hz) => Ok(Self::from_hz(hz)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Complete design snapshot for one filter
///
/// Compared field by field against the previous snapshot to decide how much
/// of the design has to be recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Sample rate in Hz
    pub sample_rate: f32,
    pub filter_type: FilterType,
    /// Pole count (filter order)
    pub poles: usize,
    pub mode: FilterMode,
    /// Corner (lowpass/highpass) or center (band modes) frequency in Hz
    pub frequency: f32,
    /// Resonance for lowpass/highpass, band width for band modes (0-1)
    pub qbw: f32,
    pub bandwidth_mode: BandwidthMode,
}

impl FilterParams {
    pub fn new(
        sample_rate: f32,
        filter_type: FilterType,
        poles: usize,
        mode: FilterMode,
        frequency: f32,
        qbw: f32,
        bandwidth_mode: BandwidthMode,
    ) -> Self {
        Self {
            sample_rate,
            filter_type,
            poles,
            mode,
            frequency,
            qbw,
            bandwidth_mode,
        }
    }

    /// Highest frequency usable at this sample rate
    pub fn upper_frequency(&self) -> f32 {
        MAX_FREQUENCY.min(NYQUIST_RATIO * self.sample_rate)
    }

    /// Check every parameter against its documented domain
    ///
    /// # Errors
    /// Returns the first violated range as a [`FilterError`].
    pub fn validate(&self) -> Result<()> {
        // a band must fit between MIN_FREQUENCY and the upper limit
        if !self.sample_rate.is_finite()
            || self.sample_rate <= 0.0
            || self.upper_frequency() - MIN_BAND_SEPARATION < MIN_FREQUENCY
        {
            return Err(FilterError::SampleRate(self.sample_rate));
        }
        if self.poles < MIN_POLES || self.poles > MAX_POLES {
            return Err(FilterError::PoleCount {
                poles: self.poles,
                min: MIN_POLES,
                max: MAX_POLES,
            });
        }
        if self.poles % POLE_STEP != 0 {
            return Err(FilterError::PoleStep {
                poles: self.poles,
                step: POLE_STEP,
            });
        }
        let upper = self.upper_frequency();
        if !(self.frequency >= MIN_FREQUENCY && self.frequency <= upper) {
            return Err(FilterError::Frequency {
                frequency: self.frequency,
                min: MIN_FREQUENCY,
                max: upper,
            });
        }
        if !(self.qbw >= MIN_QBW && self.qbw <= MAX_QBW) {
            return Err(FilterError::Bandwidth {
                qbw: self.qbw,
                min: MIN_QBW,
                max: MAX_QBW,
            });
        }
        Ok(())
    }
}

/// Filter description without a sample rate
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub filter_type: FilterType,
    pub mode: FilterMode,
    pub poles: usize,
    pub frequency: Frequency,
    pub qbw: f32,
    pub bandwidth_mode: BandwidthMode,
}

impl FilterConfig {
    /// Bind to a sample rate, producing an engine snapshot
    pub fn to_params(&self, sample_rate: f32) -> FilterParams {
        FilterParams::new(
            sample_rate,
            self.filter_type,
            self.poles,
            self.mode,
            self.frequency.as_hz(),
            self.qbw,
            self.bandwidth_mode,
        )
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_type: FilterType::Butterworth,
            mode: FilterMode::Lowpass,
            poles: 4,
            frequency: Frequency::from_hz(1000.0),
            qbw: 0.0,
            bandwidth_mode: BandwidthMode::Linear,
        }
    }
}

/// One band of a filter bank
#[derive(Debug, Clone, Deserialize)]
pub struct BandConfig {
    #[serde(flatten)]
    pub filter: FilterConfig,
    /// Band level, 0 (silent) to 1 (unity)
    #[serde(default = "default_level")]
    pub level: f32,
}

fn default_level() -> f32 {
    1.0
}

/// Filter bank layout, usually loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BankConfig {
    pub bands: Vec<BandConfig>,
}

impl BankConfig {
    /// Parse a bank layout from TOML text
    ///
    /// # Errors
    /// Returns `FilterError::Config` if the text is not a valid layout.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| FilterError::Config(e.to_string()))?;
        if config.bands.is_empty() {
            return Err(FilterError::Config("bank has no bands".to_string()));
        }
        Ok(config)
    }
}
