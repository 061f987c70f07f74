// Lunar-Lambertian reflectance (McEwen's model) and an experimental variant
// with duplicated polynomials that can be optimized separately.

use crate::error::Result;
use crate::reflectance::{leading_coeffs, PhaseCoeffs, PhotometricAngles, Photometry, Reflectance};
use pmath::numbers::Float;

/// A cubic polynomial in the phase angle, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cubic {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

impl Cubic {
    pub fn new(c0: f64, c1: f64, c2: f64, c3: f64) -> Self {
        Cubic { c0, c1, c2, c3 }
    }

    fn from_slice(c: &[f64]) -> Self {
        Cubic::new(c[0], c[1], c[2], c[3])
    }

    pub fn eval(self, x: f64) -> f64 {
        self.c0 + self.c1 * x + self.c2 * x * x + self.c3 * x * x * x
    }
}

/// `L(g) = O + A g + B g^2 + C g^3`, with g the phase angle in degrees.
/// Reflectance is `2 L mu_0 / (mu_0 + mu) + (1 - L) mu_0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LunarLambert {
    pub l: Cubic,
}

impl LunarLambert {
    pub fn new(o: f64, a: f64, b: f64, c: f64) -> Self {
        LunarLambert {
            l: Cubic::new(o, a, b, c),
        }
    }
}

impl Default for LunarLambert {
    fn default() -> Self {
        LunarLambert::new(1., -0.019, 0.000242, -0.00000146)
    }
}

impl Photometry for LunarLambert {
    const NAME: &'static str = "lunar_lambert";
    const NUM_COEFFS: usize = 4;

    fn from_coeffs(coeffs: &[f64]) -> Result<Self> {
        let c = leading_coeffs::<Self>(coeffs)?;
        Ok(LunarLambert {
            l: Cubic::from_slice(c),
        })
    }

    fn eval(&self, angles: &PhotometricAngles, phase: PhaseCoeffs) -> Result<Reflectance> {
        let alpha = angles.checked_phase_angle()?;
        let l = self.l.eval(alpha.to_deg());

        let (mu_0, mu) = (angles.mu_0, angles.mu);
        let reflectance = 2. * l * mu_0 / (mu_0 + mu) + (1. - l) * mu_0;
        if mu_0 + mu == 0. || !reflectance.is_finite() {
            return Ok(Reflectance::zero(alpha));
        }

        // Compensates for points on the terrain being too bright when the sun
        // is behind the spacecraft as seen from those points.
        Ok(Reflectance::finite_or_zero(
            reflectance * phase.dimming(alpha),
            alpha,
        ))
    }
}

/// Lunar-Lambertian with two independent pairs of polynomials:
/// `2 L1 mu_0 / (mu_0 + mu) / K1 + (1 - L2) mu_0 / K2`. A `K` that evaluates
/// to exactly zero is replaced by one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExperimentalLunarLambert {
    pub l1: Cubic,
    pub k1: Cubic,
    pub l2: Cubic,
    pub k2: Cubic,
}

impl ExperimentalLunarLambert {
    /// Starts both halves from the same lunar-lambertian polynomial with
    /// constant unit `K`s, which evaluates the same as `model`.
    pub fn from_lunar_lambert(model: LunarLambert) -> Self {
        let one = Cubic::new(1., 0., 0., 0.);
        ExperimentalLunarLambert {
            l1: model.l,
            k1: one,
            l2: model.l,
            k2: one,
        }
    }
}

// K == 0 would divide by zero, use 1 instead:
fn non_zero(k: f64) -> f64 {
    if k == 0. {
        1.
    } else {
        k
    }
}

impl Photometry for ExperimentalLunarLambert {
    const NAME: &'static str = "arbitrary_model";
    const NUM_COEFFS: usize = 16;

    fn from_coeffs(coeffs: &[f64]) -> Result<Self> {
        let c = leading_coeffs::<Self>(coeffs)?;
        Ok(ExperimentalLunarLambert {
            l1: Cubic::from_slice(&c[0..4]),
            k1: Cubic::from_slice(&c[4..8]),
            l2: Cubic::from_slice(&c[8..12]),
            k2: Cubic::from_slice(&c[12..16]),
        })
    }

    fn eval(&self, angles: &PhotometricAngles, phase: PhaseCoeffs) -> Result<Reflectance> {
        let alpha = angles.checked_phase_angle()?;
        let deg_alpha = alpha.to_deg();

        let l1 = self.l1.eval(deg_alpha);
        let k1 = non_zero(self.k1.eval(deg_alpha));
        let l2 = self.l2.eval(deg_alpha);
        let k2 = non_zero(self.k2.eval(deg_alpha));

        let (mu_0, mu) = (angles.mu_0, angles.mu);
        let reflectance = 2. * l1 * mu_0 / (mu_0 + mu) / k1 + (1. - l2) * mu_0 / k2;
        if mu_0 + mu == 0. || !reflectance.is_finite() {
            return Ok(Reflectance::zero(alpha));
        }

        Ok(Reflectance::finite_or_zero(
            reflectance * phase.dimming(alpha),
            alpha,
        ))
    }
}
