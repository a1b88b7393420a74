use num_complex::Complex64;

use super::biquad::Biquad;
use super::cascade::Cascade;
use super::design::derive_sections;
use super::filter::Filter;
use super::poles::{PoleSet, chebyshev_ripple_db, derive_poles};
use super::warp::Warped;
use crate::config::{FilterMode, FilterParams, FilterType};
use crate::error::Result;

/// How much of a design a parameter change invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Recompute {
    /// Parameters unchanged
    Nothing,
    /// Same prototype poles, new section coefficients
    Redesign,
    /// New prototype poles and new section coefficients
    Repole,
}

/// Decide the minimal recomputation from `previous` to `next`
///
/// Poles depend on type, mode and order, and on `qbw` only through the
/// Chebyshev lowpass/highpass ripple. Everything else only moves the
/// section coefficients.
pub fn plan_recompute(previous: Option<&FilterParams>, next: &FilterParams) -> Recompute {
    let Some(prev) = previous else {
        return Recompute::Repole;
    };

    let chebyshev_ripple_changed = next.filter_type == FilterType::Chebyshev
        && matches!(next.mode, FilterMode::Lowpass | FilterMode::Highpass)
        && prev.qbw != next.qbw;
    if prev.filter_type != next.filter_type
        || prev.mode != next.mode
        || prev.poles != next.poles
        || chebyshev_ripple_changed
    {
        return Recompute::Repole;
    }

    if prev.frequency != next.frequency
        || prev.qbw != next.qbw
        || prev.sample_rate != next.sample_rate
        || prev.bandwidth_mode != next.bandwidth_mode
    {
        return Recompute::Redesign;
    }

    Recompute::Nothing
}

/// Butterworth/Chebyshev filter with lowpass, highpass, bandpass and
/// bandreject modes
///
/// Configure at control rate with [`configure`](Self::configure), then call
/// [`process`](Filter::process) once per sample. Configuring with unchanged
/// parameters does no work; pole derivation only runs when the prototype
/// actually changes.
///
/// # Example
/// ```
/// use multimode::config::{BandwidthMode, FilterMode, FilterParams, FilterType};
/// use multimode::signal_processing::{Filter, MultimodeFilter};
///
/// let mut filter = MultimodeFilter::new();
/// filter.configure(FilterParams::new(
///     44100.0,
///     FilterType::Butterworth,
///     4,
///     FilterMode::Lowpass,
///     1000.0,
///     0.0,
///     BandwidthMode::Linear,
/// ));
/// let out = filter.process(1.0);
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultimodeFilter {
    params: Option<FilterParams>,
    poles: PoleSet,
    cascade: Cascade,
    repoles: u64,
    redesigns: u64,
}

impl MultimodeFilter {
    /// Unconfigured filter; passes samples through until configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured filter
    ///
    /// # Errors
    /// Returns the validation error for out-of-range parameters.
    pub fn with_params(params: FilterParams) -> Result<Self> {
        let mut filter = Self::new();
        filter.try_configure(params)?;
        Ok(filter)
    }

    /// Apply a parameter snapshot, recomputing only what changed
    ///
    /// # Panics
    /// If any parameter is outside its documented range. Callers clamp
    /// knob and CV values before configuring.
    pub fn configure(&mut self, params: FilterParams) -> Recompute {
        if let Err(e) = params.validate() {
            panic!("invalid filter parameters: {e}");
        }
        self.apply(params)
    }

    /// Like [`configure`](Self::configure) but reports invalid parameters
    /// instead of panicking; the filter is left untouched on error.
    ///
    /// # Errors
    /// Returns the first violated range.
    pub fn try_configure(&mut self, params: FilterParams) -> Result<Recompute> {
        params.validate()?;
        Ok(self.apply(params))
    }

    fn apply(&mut self, params: FilterParams) -> Recompute {
        let recompute = plan_recompute(self.params.as_ref(), &params);
        if recompute == Recompute::Nothing {
            return recompute;
        }

        let sample_rate_changed = self
            .params
            .is_some_and(|prev| prev.sample_rate != params.sample_rate);
        self.params = Some(params);

        if recompute == Recompute::Repole {
            let ripple = chebyshev_ripple_db(params.mode, params.qbw);
            self.poles = derive_poles(params.filter_type, params.poles, ripple);
            self.repoles += 1;
            log::debug!(
                "Repole: {:?} {:?} {} poles (gain {:.6})",
                params.filter_type,
                params.mode,
                params.poles,
                self.poles.gain()
            );
        }

        let warped = if params.mode.is_band() {
            Warped::band(
                params.frequency,
                params.qbw,
                params.bandwidth_mode,
                params.sample_rate,
                params.upper_frequency(),
            )
        } else {
            Warped::corner(params.frequency, params.sample_rate)
        };
        let plan = derive_sections(&self.poles, params.mode, &warped, params.qbw);
        self.cascade.load(&plan, self.poles.gain());
        self.redesigns += 1;
        log::trace!(
            "Redesign: {:.1} Hz qbw {:.3} -> {} sections",
            params.frequency,
            params.qbw,
            plan.len()
        );

        if sample_rate_changed {
            self.cascade.reset();
        }

        recompute
    }

    /// Current parameter snapshot, if configured
    pub fn params(&self) -> Option<&FilterParams> {
        self.params.as_ref()
    }

    pub fn poles(&self) -> &PoleSet {
        &self.poles
    }

    pub fn sections(&self) -> &[Biquad] {
        self.cascade.sections()
    }

    pub fn section_count(&self) -> usize {
        self.cascade.len()
    }

    pub fn output_gain(&self) -> f64 {
        self.cascade.gain()
    }

    /// Number of pole derivations performed so far
    pub fn repole_count(&self) -> u64 {
        self.repoles
    }

    /// Number of coefficient rebuilds performed so far
    pub fn redesign_count(&self) -> u64 {
        self.redesigns
    }

    pub fn is_stable(&self) -> bool {
        self.cascade.is_stable()
    }

    /// Complex response at `frequency` Hz for the configured sample rate
    pub fn frequency_response(&self, frequency: f32) -> Complex64 {
        let sample_rate = self.params.map_or(1.0, |p| p.sample_rate as f64);
        self.cascade
            .frequency_response(frequency as f64, sample_rate)
    }

    /// Magnitude response at `frequency` Hz in dB
    pub fn magnitude_db(&self, frequency: f32) -> f64 {
        20.0 * self.frequency_response(frequency).norm().log10()
    }
}

impl Filter for MultimodeFilter {
    #[inline]
    fn process(&mut self, sample: f32) -> f32 {
        self.cascade.process(sample as f64) as f32
    }

    fn reset(&mut self) {
        self.cascade.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandwidthMode;
    use approx::assert_abs_diff_eq;

    fn params(mode: FilterMode) -> FilterParams {
        FilterParams::new(
            44100.0,
            FilterType::Butterworth,
            4,
            mode,
            1000.0,
            0.0,
            BandwidthMode::Linear,
        )
    }

    #[test]
    fn test_first_configure_repoles() {
        assert_eq!(plan_recompute(None, &params(FilterMode::Lowpass)), Recompute::Repole);
    }

    #[test]
    fn test_unchanged_is_nothing() {
        let p = params(FilterMode::Lowpass);
        assert_eq!(plan_recompute(Some(&p), &p), Recompute::Nothing);
    }

    #[test]
    fn test_redesign_triggers() {
        let prev = params(FilterMode::Lowpass);

        let mut next = prev;
        next.frequency = 2000.0;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Redesign);

        let mut next = prev;
        next.sample_rate = 48000.0;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Redesign);

        let mut next = prev;
        next.bandwidth_mode = BandwidthMode::Pitch;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Redesign);

        // Butterworth poles do not depend on qbw
        let mut next = prev;
        next.qbw = 0.5;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Redesign);
    }

    #[test]
    fn test_repole_triggers() {
        let prev = params(FilterMode::Lowpass);

        let mut next = prev;
        next.mode = FilterMode::Highpass;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Repole);

        let mut next = prev;
        next.poles = 5;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Repole);

        let mut next = prev;
        next.filter_type = FilterType::Chebyshev;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Repole);
    }

    #[test]
    fn test_chebyshev_qbw_repoles_only_for_lowpass_highpass() {
        let mut prev = params(FilterMode::Highpass);
        prev.filter_type = FilterType::Chebyshev;
        let mut next = prev;
        next.qbw = 0.3;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Repole);

        let mut prev = params(FilterMode::Bandpass);
        prev.filter_type = FilterType::Chebyshev;
        let mut next = prev;
        next.qbw = 0.3;
        assert_eq!(plan_recompute(Some(&prev), &next), Recompute::Redesign);
    }

    #[test]
    fn test_counters() {
        let mut filter = MultimodeFilter::new();
        let p = params(FilterMode::Lowpass);
        assert_eq!(filter.configure(p), Recompute::Repole);
        assert_eq!(filter.configure(p), Recompute::Nothing);
        assert_eq!(filter.repole_count(), 1);
        assert_eq!(filter.redesign_count(), 1);

        let mut next = p;
        next.frequency = 500.0;
        assert_eq!(filter.configure(next), Recompute::Redesign);
        assert_eq!(filter.repole_count(), 1);
        assert_eq!(filter.redesign_count(), 2);
    }

    #[test]
    fn test_unconfigured_passes_through() {
        let mut filter = MultimodeFilter::new();
        assert_abs_diff_eq!(filter.process(0.75), 0.75);
        assert!(filter.params().is_none());
    }

    #[test]
    fn test_try_configure_rejects_and_keeps_state() {
        let mut filter = MultimodeFilter::with_params(params(FilterMode::Lowpass)).unwrap();
        let mut bad = params(FilterMode::Lowpass);
        bad.poles = 0;
        assert!(filter.try_configure(bad).is_err());
        assert_eq!(filter.params(), Some(&params(FilterMode::Lowpass)));
        assert_eq!(filter.section_count(), 2);
    }

    #[test]
    #[should_panic(expected = "invalid filter parameters")]
    fn test_configure_panics_on_invalid() {
        let mut filter = MultimodeFilter::new();
        let mut bad = params(FilterMode::Lowpass);
        bad.qbw = 2.0;
        filter.configure(bad);
    }

    #[test]
    fn test_sample_rate_change_resets_history() {
        let mut filter = MultimodeFilter::with_params(params(FilterMode::Lowpass)).unwrap();
        for _ in 0..100 {
            filter.process(1.0);
        }
        let mut next = params(FilterMode::Lowpass);
        next.sample_rate = 48000.0;
        filter.configure(next);
        assert_abs_diff_eq!(filter.process(0.0), 0.0);
    }

    #[test]
    fn test_frequency_change_keeps_history() {
        let mut filter = MultimodeFilter::with_params(params(FilterMode::Lowpass)).unwrap();
        for _ in 0..100 {
            filter.process(1.0);
        }
        let mut next = params(FilterMode::Lowpass);
        next.frequency = 1200.0;
        filter.configure(next);
        assert!(filter.process(0.0).abs() > 0.0);
    }

    #[test]
    fn test_reset_keeps_coefficients() {
        let mut filter = MultimodeFilter::with_params(params(FilterMode::Bandpass)).unwrap();
        let before: Vec<_> = filter.sections().iter().map(Biquad::coefficients).collect();
        filter.process(1.0);
        filter.reset();
        let after: Vec<_> = filter.sections().iter().map(Biquad::coefficients).collect();
        assert_eq!(before, after);
        assert_abs_diff_eq!(filter.process(0.0), 0.0);
    }
}
