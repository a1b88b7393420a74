use num_complex::Complex64;

use super::design::SectionSpec;

/// Direct-form second-order section
///
/// Coefficients are stored divided by `b0`, so the recurrence is
/// `y = a0·x0 + a1·x1 + a2·x2 - b1·y1 - b2·y2`. First-order stages use the
/// same structure with `a2 = b2 = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    a0: f64,
    a1: f64,
    a2: f64,
    b1: f64,
    b2: f64,
    x: [f64; 3],
    y: [f64; 3],
}

impl Biquad {
    /// Identity section with empty history
    pub fn new() -> Self {
        Self {
            a0: 1.0,
            a1: 0.0,
            a2: 0.0,
            b1: 0.0,
            b2: 0.0,
            x: [0.0; 3],
            y: [0.0; 3],
        }
    }

    /// Build a section from a spec
    pub fn from_spec(spec: &SectionSpec) -> Self {
        let mut biquad = Self::new();
        biquad.set_spec(spec);
        biquad
    }

    /// Replace coefficients, normalizing by `b0`; history is kept
    pub fn set_params(&mut self, a0: f64, a1: f64, a2: f64, b0: f64, b1: f64, b2: f64) {
        let ib0 = 1.0 / b0;
        self.a0 = a0 * ib0;
        self.a1 = a1 * ib0;
        self.a2 = a2 * ib0;
        self.b1 = b1 * ib0;
        self.b2 = b2 * ib0;
    }

    pub fn set_spec(&mut self, spec: &SectionSpec) {
        let (a0, a1, a2, b0, b1, b2) = spec.coefficients();
        self.set_params(a0, a1, a2, b0, b1, b2);
    }

    /// Filter one sample
    #[inline]
    pub fn process(&mut self, sample: f64) -> f64 {
        self.x[2] = self.x[1];
        self.x[1] = self.x[0];
        self.x[0] = sample;
        self.y[2] = self.y[1];
        self.y[1] = self.y[0];

        let mut out = self.a0 * self.x[0];
        out += self.a1 * self.x[1];
        out += self.a2 * self.x[2];
        out -= self.b1 * self.y[1];
        out -= self.b2 * self.y[2];
        self.y[0] = out;
        out
    }

    /// Zero the history, keeping coefficients
    pub fn reset(&mut self) {
        self.x = [0.0; 3];
        self.y = [0.0; 3];
    }

    /// Normalized coefficients as `([a0, a1, a2], [1, b1, b2])`
    pub fn coefficients(&self) -> ([f64; 3], [f64; 3]) {
        ([self.a0, self.a1, self.a2], [1.0, self.b1, self.b2])
    }

    /// Both poles inside the unit circle (Jury criterion)
    pub fn is_stable(&self) -> bool {
        self.b2.abs() < 1.0 && self.b1.abs() < 1.0 + self.b2
    }

    /// Complex response at normalized angular frequency `omega` (radians/sample)
    pub fn response(&self, omega: f64) -> Complex64 {
        let z_inv = Complex64::from_polar(1.0, -omega);
        let z_inv2 = z_inv * z_inv;
        let num = self.a0 + z_inv * self.a1 + z_inv2 * self.a2;
        let den = Complex64::new(1.0, 0.0) + z_inv * self.b1 + z_inv2 * self.b2;
        num / den
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_passes_through() {
        let mut biquad = Biquad::new();
        for x in [1.0, -0.5, 0.25, 0.0] {
            assert_abs_diff_eq!(biquad.process(x), x);
        }
    }

    #[test]
    fn test_normalizes_by_b0() {
        let mut biquad = Biquad::new();
        biquad.set_params(2.0, 4.0, 6.0, 2.0, 1.0, 0.5);
        let (a, b) = biquad.coefficients();
        assert_eq!(a, [1.0, 2.0, 3.0]);
        assert_eq!(b, [1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_recurrence() {
        // y[n] = x[n] + 0.5 y[n-1]
        let mut biquad = Biquad::new();
        biquad.set_params(1.0, 0.0, 0.0, 1.0, -0.5, 0.0);
        assert_abs_diff_eq!(biquad.process(1.0), 1.0);
        assert_abs_diff_eq!(biquad.process(0.0), 0.5);
        assert_abs_diff_eq!(biquad.process(0.0), 0.25);
    }

    #[test]
    fn test_reset_keeps_coefficients() {
        let mut biquad = Biquad::new();
        biquad.set_params(1.0, 0.0, 0.0, 1.0, -0.5, 0.0);
        biquad.process(1.0);
        let before = biquad.coefficients();
        biquad.reset();
        assert_eq!(biquad.coefficients(), before);
        assert_abs_diff_eq!(biquad.process(0.0), 0.0);
        assert_abs_diff_eq!(biquad.process(1.0), 1.0);
    }

    #[test]
    fn test_stability() {
        let mut biquad = Biquad::new();
        biquad.set_params(1.0, 0.0, 0.0, 1.0, -0.5, 0.0);
        assert!(biquad.is_stable());
        biquad.set_params(1.0, 0.0, 0.0, 1.0, -2.5, 1.5);
        assert!(!biquad.is_stable());
    }

    #[test]
    fn test_first_order_spec() {
        let spec = SectionSpec::FirstOrder {
            a0: 0.5,
            a1: 0.5,
            b0: 1.0,
            b1: 0.0,
        };
        let biquad = Biquad::from_spec(&spec);
        // two-tap average: unity at DC, zero at Nyquist
        assert_abs_diff_eq!(biquad.response(0.0).norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            biquad.response(std::f64::consts::PI).norm(),
            0.0,
            epsilon = 1e-12
        );
    }
}
