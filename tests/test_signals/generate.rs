#![allow(dead_code)]

use multimode::config::{BandwidthMode, FilterMode, FilterParams, FilterType};
use multimode::constants::{MAX_POLES, MIN_POLES};
use multimode::signal_processing::Filter;
use multimode::simulation::measure_gain_db;

pub const MODES: [FilterMode; 4] = [
    FilterMode::Lowpass,
    FilterMode::Highpass,
    FilterMode::Bandpass,
    FilterMode::Bandreject,
];

pub const TYPES: [FilterType; 2] = [FilterType::Butterworth, FilterType::Chebyshev];

pub fn params(
    sample_rate: f32,
    filter_type: FilterType,
    poles: usize,
    mode: FilterMode,
    frequency: f32,
    qbw: f32,
    bandwidth_mode: BandwidthMode,
) -> FilterParams {
    FilterParams::new(
        sample_rate,
        filter_type,
        poles,
        mode,
        frequency,
        qbw,
        bandwidth_mode,
    )
}

/// Butterworth snapshot at 44.1 kHz with linear bandwidth
pub fn butterworth(poles: usize, mode: FilterMode, frequency: f32, qbw: f32) -> FilterParams {
    params(
        44100.0,
        FilterType::Butterworth,
        poles,
        mode,
        frequency,
        qbw,
        BandwidthMode::Linear,
    )
}

/// Every type, mode and pole count over a spread of frequencies and widths
pub fn all_configurations(sample_rate: f32, frequencies: &[f32]) -> Vec<FilterParams> {
    let mut out = Vec::new();
    for filter_type in TYPES {
        for mode in MODES {
            for poles in MIN_POLES..=MAX_POLES {
                for &frequency in frequencies {
                    for qbw in [0.0, 0.5, 1.0] {
                        for bandwidth_mode in [BandwidthMode::Linear, BandwidthMode::Pitch] {
                            out.push(params(
                                sample_rate,
                                filter_type,
                                poles,
                                mode,
                                frequency,
                                qbw,
                                bandwidth_mode,
                            ));
                        }
                    }
                }
            }
        }
    }
    out
}

/// Measured steady-state gain of a sine through `filter`
pub fn steady_gain_db<F: Filter>(filter: &mut F, frequency: f32, sample_rate: f32) -> f32 {
    measure_gain_db(filter, frequency, sample_rate)
}
