// The model used for Charon:
//   f(alpha) * A * mu_0 / (mu_0 + mu) + (1 - A) * mu_0
// A = 1 is the pure lunar model, A = 0.7 is typical, with f(alpha) = 0.63.

use crate::error::Result;
use crate::reflectance::{leading_coeffs, PhaseCoeffs, PhotometricAngles, Photometry, Reflectance};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Charon {
    /// A, the weight of the lunar term.
    pub albedo: f64,
    /// The phase function value f(alpha).
    pub f_alpha: f64,
}

impl Charon {
    /// Both parameters are stored as absolute values.
    pub fn new(albedo: f64, f_alpha: f64) -> Self {
        Charon {
            albedo: albedo.abs(),
            f_alpha: f_alpha.abs(),
        }
    }
}

impl Default for Charon {
    fn default() -> Self {
        Charon::new(0.7, 0.63)
    }
}

impl Photometry for Charon {
    const NAME: &'static str = "charon";
    const NUM_COEFFS: usize = 2;

    fn from_coeffs(coeffs: &[f64]) -> Result<Self> {
        let c = leading_coeffs::<Self>(coeffs)?;
        Ok(Charon::new(c[0], c[1]))
    }

    fn eval(&self, angles: &PhotometricAngles, _phase: PhaseCoeffs) -> Result<Reflectance> {
        let alpha = angles.phase_angle();
        let (mu_0, mu) = (angles.mu_0, angles.mu);
        let a = self.albedo;

        let reflectance = self.f_alpha * a * mu_0 / (mu_0 + mu) + (1. - a) * mu_0;
        if mu_0 + mu == 0. {
            return Ok(Reflectance::zero(alpha));
        }
        Ok(Reflectance::finite_or_zero(reflectance, alpha))
    }
}
