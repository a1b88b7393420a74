use std::f64::consts::PI;

use crate::config::BandwidthMode;
use crate::constants::{
    MAX_BW_LINEAR, MAX_BW_PITCH, MIN_BAND_SEPARATION, MIN_BW_LINEAR, MIN_BW_PITCH,
    MIN_FREQUENCY,
};

/// Tangent pre-warp of a frequency for the bilinear transform
pub fn prewarp(frequency: f32, sample_rate: f32) -> f64 {
    (frequency as f64 * PI / sample_rate as f64).tan()
}

/// Low and high band edges in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEdges {
    pub low: f32,
    pub high: f32,
}

impl BandEdges {
    pub fn width(&self) -> f32 {
        self.high - self.low
    }
}

/// Band edges around `frequency` for the given width setting
///
/// Both edges stay inside `MIN_FREQUENCY..=upper` and are always at least
/// `MIN_BAND_SEPARATION` apart.
pub fn band_edges(frequency: f32, qbw: f32, mode: BandwidthMode, upper: f32) -> BandEdges {
    let low_limit = upper - MIN_BAND_SEPARATION;
    let (low, high) = match mode {
        BandwidthMode::Linear => {
            let bandwidth = MIN_BW_LINEAR.max(MAX_BW_LINEAR * qbw);
            (
                frequency - 0.5 * bandwidth,
                frequency + 0.5 * bandwidth,
            )
        }
        BandwidthMode::Pitch => {
            let bandwidth = MIN_BW_PITCH.max(MAX_BW_PITCH * qbw);
            (
                2f32.powf(-bandwidth) * frequency,
                2f32.powf(bandwidth) * frequency,
            )
        }
    };

    let low = low.max(MIN_FREQUENCY).min(low_limit);
    let high = upper.min((low + MIN_BAND_SEPARATION).max(high));
    BandEdges { low, high }
}

/// Warped design frequencies for one redesign
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warped {
    /// Lowpass/highpass corner
    Corner { wa: f64 },
    /// Band modes: `w = wah - wal`, `w02 = wah * wal`
    Band { w: f64, w02: f64, edges: BandEdges },
}

impl Warped {
    pub fn corner(frequency: f32, sample_rate: f32) -> Self {
        Self::Corner {
            wa: prewarp(frequency, sample_rate),
        }
    }

    pub fn band(
        frequency: f32,
        qbw: f32,
        mode: BandwidthMode,
        sample_rate: f32,
        upper: f32,
    ) -> Self {
        let edges = band_edges(frequency, qbw, mode, upper);
        let wal = prewarp(edges.low, sample_rate);
        let wah = prewarp(edges.high, sample_rate);
        Self::Band {
            w: wah - wal,
            w02: wah * wal,
            edges,
        }
    }
}
