use crate::signal_processing::Filter;
use crate::signal_processing::math::{amplitude_to_decibels, rms};

use super::{generate_impulse, generate_sine};

/// Steady-state gain of `filter` at `frequency` Hz, in dB
///
/// Runs one second of sine through the filter and compares the RMS of
/// the second half against the input's.
pub fn measure_gain_db<F: Filter>(filter: &mut F, frequency: f32, sample_rate: f32) -> f32 {
    let n = sample_rate as usize;
    let input = generate_sine(frequency, 1.0, n, sample_rate);
    let mut output = input.clone();
    filter.reset();
    filter.process_buffer(&mut output);
    amplitude_to_decibels(rms(&output[n / 2..]) / rms(&input[n / 2..]))
}

/// First `num_samples` of the impulse response, starting from reset
pub fn impulse_response<F: Filter>(filter: &mut F, num_samples: usize) -> Vec<f32> {
    let mut samples = generate_impulse(num_samples);
    filter.reset();
    filter.process_buffer(&mut samples);
    samples
}

/// Largest magnitude in the final `tail` samples
pub fn tail_peak(samples: &[f32], tail: usize) -> f32 {
    samples[samples.len().saturating_sub(tail)..]
        .iter()
        .fold(0.0f32, |m, x| m.max(x.abs()))
}
