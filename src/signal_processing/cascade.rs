use std::f64::consts::PI;

use num_complex::Complex64;

use super::biquad::Biquad;
use super::design::SectionPlan;
use crate::constants::MAX_POLES;

/// Ordered chain of biquads with an output gain
///
/// Capacity is fixed at `MAX_POLES` sections; only the first
/// [`len`](Cascade::len) are evaluated.
#[derive(Debug, Clone)]
pub struct Cascade {
    sections: [Biquad; MAX_POLES],
    len: usize,
    gain: f64,
}

impl Cascade {
    pub fn new() -> Self {
        Self {
            sections: [Biquad::new(); MAX_POLES],
            len: 0,
            gain: 1.0,
        }
    }

    /// Load a new plan
    ///
    /// Sections that were inactive before start from zero history; the
    /// others keep theirs so a coefficient change does not click.
    pub fn load(&mut self, plan: &SectionPlan, gain: f64) {
        let n = plan.len();
        for section in &mut self.sections[self.len.min(n)..n] {
            section.reset();
        }
        for (section, spec) in self.sections.iter_mut().zip(plan.sections()) {
            section.set_spec(spec);
        }
        self.len = n;
        self.gain = gain;
    }

    /// Filter one sample through every active section
    #[inline]
    pub fn process(&mut self, sample: f64) -> f64 {
        let mut sample = sample;
        for section in &mut self.sections[..self.len] {
            sample = section.process(sample);
        }
        self.gain * sample
    }

    pub fn reset(&mut self) {
        for section in &mut self.sections[..self.len] {
            section.reset();
        }
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn is_stable(&self) -> bool {
        self.sections().iter().all(Biquad::is_stable)
    }

    /// Complex response at `frequency` Hz
    pub fn frequency_response(&self, frequency: f64, sample_rate: f64) -> Complex64 {
        let omega = 2.0 * PI * frequency / sample_rate;
        self.sections()
            .iter()
            .fold(Complex64::new(self.gain, 0.0), |acc, section| {
                acc * section.response(omega)
            })
    }

    /// Magnitude response at `frequency` Hz in dB
    pub fn magnitude_db(&self, frequency: f64, sample_rate: f64) -> f64 {
        20.0 * self.frequency_response(frequency, sample_rate).norm().log10()
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterMode, FilterType};
    use crate::signal_processing::design::derive_sections;
    use crate::signal_processing::poles::derive_poles;
    use crate::signal_processing::warp::Warped;
    use approx::assert_abs_diff_eq;

    fn lowpass_plan(poles: usize) -> SectionPlan {
        let set = derive_poles(FilterType::Butterworth, poles, 0.0);
        derive_sections(&set, FilterMode::Lowpass, &Warped::corner(1000.0, 48000.0), 0.0)
    }

    #[test]
    fn test_empty_cascade_is_gain() {
        let mut cascade = Cascade::new();
        assert!(cascade.is_empty());
        assert_abs_diff_eq!(cascade.process(0.5), 0.5);
    }

    #[test]
    fn test_load_sets_length_and_gain() {
        let mut cascade = Cascade::new();
        cascade.load(&lowpass_plan(5), 0.5);
        assert_eq!(cascade.len(), 3);
        assert_abs_diff_eq!(cascade.gain(), 0.5);
        assert!(cascade.is_stable());
    }

    #[test]
    fn test_dc_gain_of_lowpass() {
        let mut cascade = Cascade::new();
        cascade.load(&lowpass_plan(4), 1.0);
        let mut out = 0.0;
        for _ in 0..20000 {
            out = cascade.process(1.0);
        }
        assert_abs_diff_eq!(out, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cascade.magnitude_db(0.0, 48000.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_newly_active_sections_start_clean() {
        let mut cascade = Cascade::new();
        cascade.load(&lowpass_plan(2), 1.0);
        for _ in 0..100 {
            cascade.process(1.0);
        }
        cascade.load(&lowpass_plan(4), 1.0);
        // second section never ran: zero history
        let untouched = Biquad::from_spec(&lowpass_plan(4).sections()[1]);
        assert_eq!(cascade.sections()[1], untouched);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut cascade = Cascade::new();
        cascade.load(&lowpass_plan(4), 1.0);
        cascade.process(1.0);
        cascade.reset();
        assert_abs_diff_eq!(cascade.process(0.0), 0.0);
    }
}
