use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Pole count {poles} outside supported range {min}..={max}")]
    PoleCount { poles: usize, min: usize, max: usize },

    #[error("Pole count {poles} is not a multiple of {step}")]
    PoleStep { poles: usize, step: usize },

    #[error("Frequency {frequency:.3} Hz outside range {min:.1}..={max:.1} Hz")]
    Frequency { frequency: f32, min: f32, max: f32 },

    #[error("Bandwidth/Q {qbw:.4} outside range {min:.1}..={max:.1}")]
    Bandwidth { qbw: f32, min: f32, max: f32 },

    #[error("Invalid sample rate: {0}")]
    SampleRate(f32),

    #[error("Band index {index} out of range for {bands} bands")]
    BandIndex { index: usize, bands: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
