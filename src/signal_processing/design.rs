//! Mode-specific section derivation
//!
//! Turns a prototype [`PoleSet`] and the warped design frequencies into an
//! ordered [`SectionPlan`] through the bilinear transform. Lowpass and
//! highpass produce one section per stored pole; bandpass and bandreject
//! split every conjugate pair into two sections.

use num_complex::Complex64;

use super::poles::{Pole, PoleSet};
use super::warp::Warped;
use crate::config::FilterMode;
use crate::constants::{IQ_BASE, IQ_SLOPE, MAX_POLES};

/// Coefficients of one cascade stage
///
/// `a*` are feed-forward, `b*` feedback; `b0` normalizes every term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionSpec {
    FirstOrder {
        a0: f64,
        a1: f64,
        b0: f64,
        b1: f64,
    },
    SecondOrder {
        a0: f64,
        a1: f64,
        a2: f64,
        b0: f64,
        b1: f64,
        b2: f64,
    },
}

impl SectionSpec {
    /// Coefficients as `(a0, a1, a2, b0, b1, b2)`, zero-padded for first order
    pub fn coefficients(&self) -> (f64, f64, f64, f64, f64, f64) {
        match *self {
            Self::FirstOrder { a0, a1, b0, b1 } => (a0, a1, 0.0, b0, b1, 0.0),
            Self::SecondOrder {
                a0,
                a1,
                a2,
                b0,
                b1,
                b2,
            } => (a0, a1, a2, b0, b1, b2),
        }
    }

    pub fn is_first_order(&self) -> bool {
        matches!(self, Self::FirstOrder { .. })
    }
}

impl Default for SectionSpec {
    fn default() -> Self {
        Self::FirstOrder {
            a0: 1.0,
            a1: 0.0,
            b0: 1.0,
            b1: 0.0,
        }
    }
}

/// Ordered section specs for one design
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPlan {
    sections: [SectionSpec; MAX_POLES],
    len: usize,
}

impl SectionPlan {
    fn push(&mut self, spec: SectionSpec) {
        self.sections[self.len] = spec;
        self.len += 1;
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for SectionPlan {
    fn default() -> Self {
        Self {
            sections: [SectionSpec::default(); MAX_POLES],
            len: 0,
        }
    }
}

/// Number of sections a design with `poles` poles needs in `mode`
pub fn section_count(mode: FilterMode, poles: usize) -> usize {
    match mode {
        FilterMode::Lowpass | FilterMode::Highpass => poles / 2 + poles % 2,
        FilterMode::Bandpass | FilterMode::Bandreject => (poles / 2) * 2 + poles % 2,
    }
}

/// Quality adjustment for the middle lowpass/highpass section
pub fn quality_adjust(qbw: f32) -> f64 {
    IQ_BASE - IQ_SLOPE * qbw as f64
}

/// Derive the section plan for a pole set
///
/// # Panics
/// If `warped` does not match `mode` (a corner for lowpass/highpass, a band
/// for bandpass/bandreject).
pub fn derive_sections(poles: &PoleSet, mode: FilterMode, warped: &Warped, qbw: f32) -> SectionPlan {
    match (mode, *warped) {
        (FilterMode::Lowpass, Warped::Corner { wa }) => lowpass(poles, wa, quality_adjust(qbw)),
        (FilterMode::Highpass, Warped::Corner { wa }) => highpass(poles, wa, quality_adjust(qbw)),
        (FilterMode::Bandpass, Warped::Band { w, w02, .. }) => bandpass(poles, w, w02),
        (FilterMode::Bandreject, Warped::Band { w, w02, .. }) => bandreject(poles, w, w02),
        (mode, warped) => panic!("{:?} cannot be designed from {:?}", mode, warped),
    }
}

/// Conjugate pairs, skipping the lone real pole of odd designs
fn pairs(poles: &PoleSet) -> &[Pole] {
    let skip = usize::from(poles.has_real_pole());
    &poles.poles()[skip..]
}

fn adjusted_x(x: f64, i: usize, nf: usize, iq: f64) -> f64 {
    let factor = if i == nf / 2 { iq } else { 1.0 };
    factor * x
}

fn lowpass(poles: &PoleSet, wa: f64, iq: f64) -> SectionPlan {
    let mut plan = SectionPlan::default();
    let wa2 = wa * wa;

    if poles.has_real_pole() {
        let wap = wa * poles.poles()[0].real();
        plan.push(SectionSpec::FirstOrder {
            a0: wa,
            a1: wa,
            b0: wap + 1.0,
            b1: wap - 1.0,
        });
    }

    let pairs = pairs(poles);
    let nf = pairs.len();
    for (i, pole) in pairs.iter().enumerate() {
        let ywa2 = pole.y * wa2;
        let ywa21 = ywa2 + 1.0;
        let xwa = adjusted_x(pole.x, i, nf, iq) * wa;
        plan.push(SectionSpec::SecondOrder {
            a0: wa2,
            a1: wa2 + wa2,
            a2: wa2,
            b0: ywa21 - xwa,
            b1: -2.0 + (ywa2 + ywa2),
            b2: ywa21 + xwa,
        });
    }

    plan
}

fn highpass(poles: &PoleSet, wa: f64, iq: f64) -> SectionPlan {
    let mut plan = SectionPlan::default();
    let wa2 = wa * wa;

    if poles.has_real_pole() {
        let rp = poles.poles()[0].real();
        plan.push(SectionSpec::FirstOrder {
            a0: 1.0,
            a1: -1.0,
            b0: wa + rp,
            b1: wa - rp,
        });
    }

    let pairs = pairs(poles);
    let nf = pairs.len();
    for (i, pole) in pairs.iter().enumerate() {
        let wa2y = wa2 + pole.y;
        let xwa = adjusted_x(pole.x, i, nf, iq) * wa;
        plan.push(SectionSpec::SecondOrder {
            a0: 1.0,
            a1: -2.0,
            a2: 1.0,
            b0: wa2y - xwa,
            b1: (wa2 + wa2) - (pole.y + pole.y),
            b2: wa2y + xwa,
        });
    }

    plan
}

/// `(-Re(y + ȳ), Re(y·ȳ))` for an analog root and its partner
fn pair_factors(y: Complex64, yc: Complex64) -> (f64, f64) {
    (-(y + yc).re, (y * yc).re)
}

fn bandpass(poles: &PoleSet, w: f64, w02: f64) -> SectionPlan {
    let mut plan = SectionPlan::default();
    let w2 = w * w;
    let (a0, a1, a2) = (w, 0.0, -w);

    if poles.has_real_pole() {
        let wp = w * poles.poles()[0].real();
        plan.push(SectionSpec::SecondOrder {
            a0,
            a1,
            a2,
            b0: 1.0 + wp + w02,
            b1: -2.0 + (w02 + w02),
            b2: 1.0 - wp + w02,
        });
    }

    for pole in pairs(poles) {
        let x = (pole.p2 * w2 - 4.0 * w02).sqrt();
        let xc = x.conj();
        let wp = pole.p * w;
        let wpc = pole.pc * w;
        let y1 = (x - wp) * 0.5;
        let y1c = (xc - wpc) * 0.5;
        let y2 = (-x - wp) * 0.5;
        let y2c = (-xc - wpc) * 0.5;

        for (f1, f2) in [pair_factors(y1, y1c), pair_factors(y2, y2c)] {
            plan.push(SectionSpec::SecondOrder {
                a0,
                a1,
                a2,
                b0: 1.0 + f1 + f2,
                b1: -2.0 + (f2 + f2),
                b2: 1.0 - f1 + f2,
            });
        }
    }

    plan
}

fn bandreject(poles: &PoleSet, w: f64, w02: f64) -> SectionPlan {
    let mut plan = SectionPlan::default();
    let w2 = w * w;
    let a0 = 1.0 + w02;
    let a1 = -2.0 + (w02 + w02);
    let a2 = a0;

    if poles.has_real_pole() {
        let rp = poles.poles()[0].real();
        let rpw02 = rp * w02;
        plan.push(SectionSpec::SecondOrder {
            a0,
            a1,
            a2,
            b0: rp + w + rpw02,
            b1: -2.0 * rp + (rpw02 + rpw02),
            b2: rp - w + rpw02,
        });
    }

    for pole in pairs(poles) {
        let x = (pole.p2 * (-4.0 * w02) + w2).sqrt();
        let xc = x.conj();
        let y1 = (x - w) * pole.i2p;
        let y1c = (xc - w) * pole.i2pc;
        let y2 = (-x - w) * pole.i2p;
        let y2c = (-xc - w) * pole.i2pc;

        for (f1, f2) in [pair_factors(y1, y1c), pair_factors(y2, y2c)] {
            let (f1, f2) = (pole.r * f1, pole.r * f2);
            plan.push(SectionSpec::SecondOrder {
                a0,
                a1,
                a2,
                b0: pole.r + f1 + f2,
                b1: -2.0 * pole.r + (f2 + f2),
                b2: pole.r - f1 + f2,
            });
        }
    }

    plan
}
