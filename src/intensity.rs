//! Conversion between reflectance and image intensity.
//!
//! The computed intensity is
//! `albedo * nonlin_reflectance(reflectance, exposure, haze) + haze[0]`, and
//! the optimizer minimizes the squared difference to the observed intensity.
//! With more than one haze coefficient the reflectance to intensity mapping
//! becomes a rational function of the reflectance (experimental).

use crate::error::{Error, Result};
use arrayvec::ArrayVec;

/// The largest number of haze coefficients any of the formulas uses.
pub const MAX_HAZE_COEFFS: usize = 6;

/// Between zero and `MAX_HAZE_COEFFS` haze coefficients. How many there are
/// selects the formula used by `nonlin_reflectance`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Haze {
    coeffs: ArrayVec<[f64; MAX_HAZE_COEFFS]>,
}

impl Haze {
    /// No haze, the linear model.
    pub fn none() -> Self {
        Haze::default()
    }

    pub fn from_slice(coeffs: &[f64]) -> Result<Self> {
        if coeffs.len() > MAX_HAZE_COEFFS {
            return Err(Error::HazeCount(coeffs.len()));
        }
        Ok(Haze {
            coeffs: coeffs.iter().copied().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coeffs
    }

    /// The additive haze, zero when there are no coefficients.
    pub fn offset(&self) -> f64 {
        self.coeffs.first().copied().unwrap_or(0.)
    }
}

/// Reflectance passed through the exposure and the haze model. The exposure
/// is divided by `steepness_factor` first: a smaller exposure needs a higher
/// reflectance to produce the same intensity, hence steeper terrain.
pub fn nonlin_reflectance(
    reflectance: f64,
    exposure: f64,
    steepness_factor: f64,
    haze: &Haze,
) -> f64 {
    let e = exposure / steepness_factor;
    let r = reflectance;
    let h = haze.as_slice();

    match h.len() {
        // Linear. With one coefficient haze[0] is added after the albedo
        // multiplication.
        0 | 1 => e * r,
        2 => e * r / (h[1] * r + 1.),
        3 => e * (r + h[2]) / (h[1] * r + 1.),
        4 => e * (h[3] * r * r + r + h[2]) / (h[1] * r + 1.),
        5 => e * (h[3] * r * r + r + h[2]) / (h[4] * r * r + h[1] * r + 1.),
        _ => e * (h[5] * r * r * r + h[3] * r * r + r + h[2]) / (h[4] * r * r + h[1] * r + 1.),
    }
}

/// The intensity predicted for a pixel.
pub fn calc_intensity(
    albedo: f64,
    reflectance: f64,
    exposure: f64,
    steepness_factor: f64,
    haze: &Haze,
) -> f64 {
    albedo * nonlin_reflectance(reflectance, exposure, steepness_factor, haze) + haze.offset()
}

/// The albedo that makes `calc_intensity` reproduce `intensity`. Returns zero
/// instead of dividing by zero.
pub fn calc_albedo(
    intensity: f64,
    reflectance: f64,
    exposure: f64,
    steepness_factor: f64,
    haze: &Haze,
) -> f64 {
    let adjusted_intensity = intensity - haze.offset();

    let nonlin_ref = nonlin_reflectance(reflectance, exposure, steepness_factor, haze);
    if nonlin_ref == 0. {
        return 0.;
    }

    adjusted_intensity / nonlin_ref
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    const HAZE: [f64; 6] = [0.05, 0.3, 0.02, 0.4, 0.1, 0.2];

    #[test]
    fn too_many_coefficients() {
        let err = Haze::from_slice(&[0.; 7]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(Haze::from_slice(&HAZE).is_ok());
    }

    #[test]
    fn formulas_by_length() {
        let (r, e, s) = (0.5, 3., 1.5);
        let ee = e / s;
        let h = HAZE;
        let expected = [
            ee * r,
            ee * r,
            ee * r / (h[1] * r + 1.),
            ee * (r + h[2]) / (h[1] * r + 1.),
            ee * (h[3] * r * r + r + h[2]) / (h[1] * r + 1.),
            ee * (h[3] * r * r + r + h[2]) / (h[4] * r * r + h[1] * r + 1.),
            ee * (h[5] * r * r * r + h[3] * r * r + r + h[2]) / (h[4] * r * r + h[1] * r + 1.),
        ];
        for (len, &want) in expected.iter().enumerate() {
            let haze = Haze::from_slice(&HAZE[..len]).unwrap();
            assert_relative_eq!(nonlin_reflectance(r, e, s, &haze), want, epsilon = 1e-15);
        }
    }

    #[test]
    fn intensity_adds_haze_offset() {
        let haze = Haze::from_slice(&[0.1]).unwrap();
        assert_relative_eq!(calc_intensity(0.8, 0.5, 2., 1., &haze), 0.8 * 1. + 0.1);
        assert_relative_eq!(calc_intensity(0.8, 0.5, 2., 1., &Haze::none()), 0.8);
    }

    #[test]
    fn albedo_round_trip() {
        let (a, r, e, s) = (0.73, 0.41, 1.7, 1.3);
        for len in 0..=MAX_HAZE_COEFFS {
            let haze = Haze::from_slice(&HAZE[..len]).unwrap();
            let intensity = calc_intensity(a, r, e, s, &haze);
            assert_relative_eq!(calc_albedo(intensity, r, e, s, &haze), a, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_reflectance_gives_zero_albedo() {
        let haze = Haze::from_slice(&[0.1, 0.2]).unwrap();
        assert_eq!(calc_albedo(0.7, 0., 1., 1., &haze), 0.);
        assert_eq!(calc_albedo(0.7, 0.5, 0., 1., &Haze::none()), 0.);
    }
}
