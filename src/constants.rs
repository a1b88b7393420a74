//! Design-range constants for the multimode filter engine
//!
//! Parameters handed to the engine must already lie inside these ranges;
//! the engine validates them but never clamps.

/// Smallest supported pole count.
pub const MIN_POLES: usize = 1;

/// Largest supported pole count. Also the capacity of every section array.
pub const MAX_POLES: usize = 16;

/// Pole counts must be a multiple of this step.
pub const POLE_STEP: usize = 1;

/// Largest number of conjugate pole pairs (plus the real pole for odd counts).
pub const MAX_POLE_PAIRS: usize = MAX_POLES / 2 + MAX_POLES % 2;

/// Lowest corner frequency in Hz.
pub const MIN_FREQUENCY: f32 = 1.0;

/// Highest corner frequency in Hz.
pub const MAX_FREQUENCY: f32 = 21000.0;

/// Highest usable frequency as a fraction of the sample rate.
/// Keeps the tangent pre-warp away from its pole at Nyquist.
pub const NYQUIST_RATIO: f32 = 0.49;

pub const MIN_QBW: f32 = 0.0;
pub const MAX_QBW: f32 = 1.0;

/// Linear-mode bandwidth bounds in Hz.
pub const MIN_BW_LINEAR: f32 = 10.0;
pub const MAX_BW_LINEAR: f32 = 5000.0;

/// Pitch-mode bandwidth bounds in octaves (a quarter semitone up to two octaves).
pub const MIN_BW_PITCH: f32 = 1.0 / (12.0 * 100.0 / 25.0);
pub const MAX_BW_PITCH: f32 = 2.0;

/// Minimum separation in Hz between the low and high band edges.
pub const MIN_BAND_SEPARATION: f32 = 10.0;

/// Ripple in dB used for Chebyshev designs before any Q adjustment.
pub const CHEBYSHEV_BASE_RIPPLE_DB: f64 = 3.0;

/// Quality adjustment applied to the middle lowpass/highpass section is
/// `IQ_BASE - IQ_SLOPE * qbw`.
pub const IQ_BASE: f64 = 0.8;
pub const IQ_SLOPE: f64 = 0.6;
