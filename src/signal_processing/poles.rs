use std::f64::consts::PI;

use num_complex::Complex64;

use crate::config::{FilterMode, FilterType};
use crate::constants::{
    CHEBYSHEV_BASE_RIPPLE_DB, MAX_POLE_PAIRS, MAX_POLES, MIN_POLES, POLE_STEP,
};

/// One analog prototype pole with the quantities the section deriver needs
///
/// `p` is stored reflected into the right half plane; the deriver's
/// formulas account for the sign. `x` and `y` are the coefficients of the
/// conjugate-pair factor `s² - x·s + y` of the left half plane pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pole {
    pub p: Complex64,
    pub pc: Complex64,
    pub p2: Complex64,
    /// `1 / (2p)`
    pub i2p: Complex64,
    /// `1 / (2p̄)`
    pub i2pc: Complex64,
    pub x: f64,
    pub y: f64,
    /// `|p|`
    pub r: f64,
}

impl Pole {
    fn new(re: f64, im: f64, x: f64, y: f64) -> Self {
        let p = Complex64::new(re, im);
        let pc = p.conj();
        Self {
            p,
            pc,
            p2: p * p,
            i2p: (2.0 * p).inv(),
            i2pc: (2.0 * pc).inv(),
            x,
            y,
            r: p.norm(),
        }
    }

    /// Real part, the only part used for the lone real pole of odd designs
    pub fn real(&self) -> f64 {
        self.p.re
    }
}

impl Default for Pole {
    fn default() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self {
            p: zero,
            pc: zero,
            p2: zero,
            i2p: zero,
            i2pc: zero,
            x: 0.0,
            y: 0.0,
            r: 0.0,
        }
    }
}

/// Prototype poles for one design, innermost pair first
///
/// Holds `⌈poles/2⌉` entries in a fixed array; for odd pole counts entry 0
/// is the real pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleSet {
    poles: [Pole; MAX_POLE_PAIRS],
    len: usize,
    order: usize,
    gain: f64,
}

impl PoleSet {
    /// All stored poles
    pub fn poles(&self) -> &[Pole] {
        &self.poles[..self.len]
    }

    /// Number of stored poles (conjugate pairs plus the real pole)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The pole count the set was derived for
    pub fn order(&self) -> usize {
        self.order
    }

    /// True when entry 0 is a lone real pole
    pub fn has_real_pole(&self) -> bool {
        self.order % 2 == 1
    }

    /// Output gain that normalizes the prototype's passband
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl Default for PoleSet {
    fn default() -> Self {
        Self {
            poles: [Pole::default(); MAX_POLE_PAIRS],
            len: 0,
            order: 0,
            gain: 1.0,
        }
    }
}

/// Chebyshev passband ripple in dB for a mode and resonance setting
///
/// Lowpass and highpass trade extra ripple for resonance; band modes keep
/// the base ripple.
pub fn chebyshev_ripple_db(mode: FilterMode, qbw: f32) -> f64 {
    match mode {
        FilterMode::Lowpass | FilterMode::Highpass => {
            CHEBYSHEV_BASE_RIPPLE_DB + (6.0 * qbw as f64).max(0.0)
        }
        FilterMode::Bandpass | FilterMode::Bandreject => CHEBYSHEV_BASE_RIPPLE_DB,
    }
}

/// Derive the normalized analog lowpass prototype poles
///
/// `ripple_db` is only used for [`FilterType::Chebyshev`].
///
/// # Panics
/// If `poles` is outside `MIN_POLES..=MAX_POLES` or not a multiple of
/// `POLE_STEP`.
pub fn derive_poles(filter_type: FilterType, poles: usize, ripple_db: f64) -> PoleSet {
    assert!(
        (MIN_POLES..=MAX_POLES).contains(&poles),
        "pole count {poles} outside {MIN_POLES}..={MAX_POLES}"
    );
    assert!(
        poles % POLE_STEP == 0,
        "pole count {poles} not a multiple of {POLE_STEP}"
    );

    let n = poles as f64;
    let np = poles / 2 + poles % 2;
    let mut set = PoleSet {
        len: np,
        order: poles,
        ..PoleSet::default()
    };

    match filter_type {
        FilterType::Butterworth => {
            for k in 1..=np {
                let a = (2 * k + poles - 1) as f64 * PI / (2.0 * n);
                let re = a.cos();
                let im = a.sin();
                set.poles[np - k] = Pole::new(-re, im, re + re, re * re + im * im);
            }
            set.gain = 1.0;
        }
        FilterType::Chebyshev => {
            let e = (10f64.powf(ripple_db / 10.0) - 1.0).sqrt();
            let ef = (1.0 / e).asinh() / n;
            let efr = -ef.sinh();
            let efi = ef.cosh();

            for k in 1..=np {
                let a = (2 * k - 1) as f64 * PI / (2.0 * n);
                let re = efr * a.sin();
                let im = efi * a.cos();
                set.poles[np - k] = Pole::new(-re, im, re + re, re * re + im * im);
            }
            set.gain = 1.0 / (e * 2f64.powi(poles as i32 - 1));
        }
    }

    set
}
