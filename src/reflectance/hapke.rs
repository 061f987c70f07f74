// Hapke's model, with the two-term Henyey-Greenstein phase function, the
// opposition surge term B(g) and the H93 approximation of the Chandrasekhar
// H-functions. Example values: omega = 0.68, b = 0.17, c = 0.62, B0 = 0.52,
// h = 0.52.
//
// References:
// - McGuire, Hapke (1995): An Experimental Study of Light Scattering by Large,
//   Irregular Particles. The reflectance is R(g) above their equation 21.
// - Johnson et al. (2006), Spirit Pancam photometry: the two-term p(g), using
//   c rather than c' = 1 - c.
// - Jacquemoud et al. (1992): the B(g) term with B0 and h.
// - Fernando et al., CRISM/MRO photometry of Gusev Crater and Meridiani Planum,
//   equations (1), (2) and (4), without the S factor.

use crate::error::Result;
use crate::reflectance::{leading_coeffs, PhaseCoeffs, PhotometricAngles, Photometry, Reflectance};
use pmath::numbers::Float;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hapke {
    /// Single scattering albedo (w).
    pub omega: f64,
    /// Phase function asymmetry.
    pub b: f64,
    /// Backscatter fraction of the phase function.
    pub c: f64,
    /// Amplitude of the opposition surge.
    pub b0: f64,
    /// Angular width of the opposition surge.
    pub h: f64,
}

impl Hapke {
    /// All parameters are stored as absolute values.
    pub fn new(omega: f64, b: f64, c: f64, b0: f64, h: f64) -> Self {
        Hapke {
            omega: omega.abs(),
            b: b.abs(),
            c: c.abs(),
            b0: b0.abs(),
            h: h.abs(),
        }
    }

    /// The two-term Henyey-Greenstein phase function P(g).
    pub fn phase_function(&self, cos_g: f64) -> f64 {
        let b = self.b;
        let c = self.c;
        let b2 = b * b;
        (1. - c) * (1. - b2) / (1. + 2. * b * cos_g + b2).powf(1.5)
            + c * (1. - b2) / (1. - 2. * b * cos_g + b2).powf(1.5)
    }

    /// The opposition surge term B(g), g in radians.
    pub fn opposition_surge(&self, g: f64) -> f64 {
        self.b0 / (1. + (1. / self.h) * (g / 2.).tan())
    }

    /// The H93 approximation of the Chandrasekhar H-function.
    pub fn h_function(&self, x: f64) -> f64 {
        (1. + 2. * x) / (1. + 2. * x * (1. - self.omega).sqrt())
    }
}

impl Default for Hapke {
    fn default() -> Self {
        Hapke::new(0.68, 0.17, 0.62, 0.52, 0.52)
    }
}

impl Photometry for Hapke {
    const NAME: &'static str = "hapke";
    const NUM_COEFFS: usize = 5;

    fn from_coeffs(coeffs: &[f64]) -> Result<Self> {
        let c = leading_coeffs::<Self>(coeffs)?;
        Ok(Hapke::new(c[0], c[1], c[2], c[3], c[4]))
    }

    fn eval(&self, angles: &PhotometricAngles, _phase: PhaseCoeffs) -> Result<Reflectance> {
        let (mu_0, mu) = (angles.mu_0, angles.mu);
        let cos_g = angles.cos_alpha;
        let g = angles.phase_angle();

        let pg = self.phase_function(cos_g);
        let bg = self.opposition_surge(g);
        let h_mu0 = self.h_function(mu_0);
        let h_mu = self.h_function(mu);

        // The incident irradiance J is left at one, the exposure absorbs it.
        let reflectance =
            self.omega * f64::INV_4PI * (mu_0 / (mu_0 + mu)) * ((1. + bg) * pg + h_mu0 * h_mu - 1.);

        Ok(Reflectance::finite_or_zero(reflectance, g))
    }
}
