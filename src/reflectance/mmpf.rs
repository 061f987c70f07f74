// The MMPF model: a Lommel-Seeliger term scaled by an exponential in the phase
// angle g (degrees) and the incidence and emission cosines:
//   LS * exp(a0 + a1 g^2 + a2 g + a3 sqrt(g) + a4 mu + a5 mu_0 + a6 mu_0^2)

use crate::error::Result;
use crate::reflectance::{leading_coeffs, PhaseCoeffs, PhotometricAngles, Photometry, Reflectance};
use pmath::numbers::Float;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mmpf {
    /// a0 through a6.
    pub a: [f64; 7],
}

impl Mmpf {
    pub fn new(a: [f64; 7]) -> Self {
        Mmpf { a }
    }
}

impl Photometry for Mmpf {
    const NAME: &'static str = "mmpf";
    const NUM_COEFFS: usize = 7;

    fn from_coeffs(coeffs: &[f64]) -> Result<Self> {
        let c = leading_coeffs::<Self>(coeffs)?;
        let mut a = [0.; 7];
        a.copy_from_slice(c);
        Ok(Mmpf { a })
    }

    fn eval(&self, angles: &PhotometricAngles, _phase: PhaseCoeffs) -> Result<Reflectance> {
        // Unlike the lunar-lambertian models this is only reported:
        if !angles.is_phase_in_domain() {
            warn!(
                cos_alpha = angles.cos_alpha,
                "cosine of the phase angle out of range in the mmpf model"
            );
        }

        let g_rad = angles.phase_angle();
        let g = g_rad.to_deg();

        let ls = match angles.lommel_seeliger() {
            Some(ls) => ls,
            None => return Ok(Reflectance::zero(g_rad)),
        };

        let (mu_0, mu) = (angles.mu_0, angles.mu);
        let a = &self.a;
        let reflectance = ls
            * (a[0]
                + a[1] * g * g
                + a[2] * g
                + a[3] * g.sqrt()
                + a[4] * mu
                + a[5] * mu_0
                + a[6] * mu_0 * mu_0)
                .exp();

        Ok(Reflectance::finite_or_zero(reflectance, g_rad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn angles(mu_0: f64, mu: f64, cos_alpha: f64) -> PhotometricAngles {
        PhotometricAngles { mu_0, mu, cos_alpha }
    }

    #[test]
    fn zero_coefficients_give_lommel_seeliger() {
        let model = Mmpf::new([0.; 7]);
        let r = model
            .eval(&angles(0.9, 0.3, 0.6), PhaseCoeffs::default())
            .unwrap();
        assert_relative_eq!(r.value, 0.9 / 1.2, epsilon = 1e-15);
    }

    #[test]
    fn exponent_terms() {
        // g = 90 degrees:
        let a = angles(0.5, 0.25, 0.);
        let ls = 0.5 / 0.75;

        let mut c = [0.; 7];
        c[0] = 0.5;
        c[2] = 0.01;
        let r = Mmpf::from_coeffs(&c).unwrap().eval(&a, PhaseCoeffs::default()).unwrap();
        assert_relative_eq!(r.value, ls * (0.5f64 + 0.9).exp(), epsilon = 1e-12);

        let mut c = [0.; 7];
        c[1] = 1e-4;
        c[3] = 0.1;
        let r = Mmpf::from_coeffs(&c).unwrap().eval(&a, PhaseCoeffs::default()).unwrap();
        assert_relative_eq!(r.value, ls * (0.81f64 + 0.1 * 90f64.sqrt()).exp(), epsilon = 1e-12);

        let c = [0., 0., 0., 0., 2., -1., 4.];
        let r = Mmpf::from_coeffs(&c).unwrap().eval(&a, PhaseCoeffs::default()).unwrap();
        assert_relative_eq!(r.value, ls * (0.5f64 - 0.5 + 1.).exp(), epsilon = 1e-12);
    }

    #[test]
    fn zero_denominator_gives_zero() {
        let r = Mmpf::new([1.; 7])
            .eval(&angles(0.4, -0.4, 0.1), PhaseCoeffs::default())
            .unwrap();
        assert_eq!(r.value, 0.);
    }

    #[test]
    fn bad_phase_cosine_is_not_fatal() {
        let r = Mmpf::new([0.; 7])
            .eval(&angles(0.5, 0.5, 1.5), PhaseCoeffs::default())
            .unwrap();
        assert_relative_eq!(r.value, 0.5);
        assert_eq!(r.phase_angle, Some(0.));
    }
}
