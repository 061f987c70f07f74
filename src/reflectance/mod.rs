pub mod charon;
pub mod hapke;
pub mod lambert;
pub mod lunar_lambert;
pub mod mmpf;

pub use charon::Charon;
pub use hapke::Hapke;
pub use lunar_lambert::{Cubic, ExperimentalLunarLambert, LunarLambert};
pub use mmpf::Mmpf;

use crate::error::{Error, Result};
use crate::geometry::{GeometrySample, Illumination};
use pmath::vector::Vec3;

use num_traits::clamp;
use simple_error::SimpleError;
use tracing::trace;

use std::fmt;
use std::str::FromStr;

/// How far the squared length of a normal may be from one.
pub const UNIT_NORMAL_TOL: f64 = 1e-4;
/// How far the cosine of the phase angle may be outside of [-1, 1].
pub const PHASE_COS_TOL: f64 = 1e-8;
/// The size of the uniform coefficient buffer. The largest model (the
/// experimental lunar-lambertian one) uses all of it.
pub const MAX_MODEL_COEFFS: usize = 16;

/// The result of evaluating a reflectance model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reflectance {
    pub value: f64,
    /// Phase angle in radians. Lambert (and the neutral model) don't compute it,
    /// and it is absent when the sun or the viewer sits on the point.
    pub phase_angle: Option<f64>,
}

impl Reflectance {
    /// What a disabled model returns.
    pub fn neutral() -> Self {
        Reflectance {
            value: 1.,
            phase_angle: None,
        }
    }

    // Degenerate geometry contributes no signal. The phase angle is dropped
    // when it couldn't be computed (the sun or the viewer at the point).
    fn zero(phase_angle: f64) -> Self {
        Reflectance {
            value: 0.,
            phase_angle: finite(phase_angle),
        }
    }

    // Any non-finite value is treated as degenerate geometry.
    fn finite_or_zero(value: f64, phase_angle: f64) -> Self {
        if value.is_finite() {
            Reflectance {
                value,
                phase_angle: finite(phase_angle),
            }
        } else {
            Self::zero(phase_angle)
        }
    }
}

fn finite(x: f64) -> Option<f64> {
    if x.is_finite() {
        Some(x)
    } else {
        None
    }
}

/// Coefficients of the exponential dimming applied to the lunar-lambertian
/// models: `exp(-c1 * alpha) + c2`. The default leaves reflectance unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseCoeffs {
    pub c1: f64,
    pub c2: f64,
}

impl PhaseCoeffs {
    pub fn new(c1: f64, c2: f64) -> Self {
        PhaseCoeffs { c1, c2 }
    }

    /// The dimming factor at phase angle `alpha` (radians).
    pub fn dimming(self, alpha: f64) -> f64 {
        (-self.c1 * alpha).exp() + self.c2
    }
}

/// The cosines every model except Lambert is built from. All directions are
/// unit vectors from the surface point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotometricAngles {
    /// Cosine between the sun direction and the normal (incidence).
    pub mu_0: f64,
    /// Cosine between the viewer direction and the normal (emission).
    pub mu: f64,
    /// Cosine between the sun and the viewer directions (phase).
    pub cos_alpha: f64,
}

impl PhotometricAngles {
    /// Fails if `normal` isn't unit length.
    pub fn new(illum: Illumination, sample: GeometrySample) -> Result<Self> {
        check_unit_normal(sample.normal)?;

        let sun_dir = (illum.sun - sample.xyz).normalize();
        let view_dir = (illum.viewer - sample.xyz).normalize();

        Ok(PhotometricAngles {
            mu_0: sun_dir.dot(sample.normal),
            mu: view_dir.dot(sample.normal),
            cos_alpha: sun_dir.dot(view_dir),
        })
    }

    /// A NaN cosine (degenerate directions) isn't out of the domain, the
    /// models turn it into a zero reflectance.
    pub fn is_phase_in_domain(&self) -> bool {
        !(self.cos_alpha > 1. + PHASE_COS_TOL || self.cos_alpha < -1. - PHASE_COS_TOL)
    }

    /// Like `phase_angle`, but an out of domain cosine is an error.
    pub fn checked_phase_angle(&self) -> Result<f64> {
        if !self.is_phase_in_domain() {
            return Err(Error::PhaseAngleDomain {
                cos_alpha: self.cos_alpha,
            });
        }
        Ok(self.phase_angle())
    }

    /// The phase angle in radians. The cosine is clamped first so that rounding
    /// right at the boundary doesn't turn into NaN.
    pub fn phase_angle(&self) -> f64 {
        clamp(self.cos_alpha, -1., 1.).acos()
    }

    /// mu_0 / (mu_0 + mu), None when the denominator vanishes.
    pub fn lommel_seeliger(&self) -> Option<f64> {
        let denom = self.mu_0 + self.mu;
        if denom == 0. {
            None
        } else {
            Some(self.mu_0 / denom)
        }
    }
}

/// Fails unless `normal` has unit length within `UNIT_NORMAL_TOL`.
pub fn check_unit_normal(normal: Vec3<f64>) -> Result<()> {
    let len2 = normal.length2();
    if (len2 - 1.).abs() > UNIT_NORMAL_TOL {
        return Err(Error::NonUnitNormal { len2 });
    }
    Ok(())
}

/// A photometric law that works from the photometric angles. Lambert is the
/// odd one out and isn't one of these.
pub trait Photometry: Sized {
    /// Name used in messages and configuration files.
    const NAME: &'static str;
    /// How many leading entries of a coefficient buffer the model reads.
    const NUM_COEFFS: usize;

    /// Builds the model from the leading `NUM_COEFFS` values of `coeffs`.
    fn from_coeffs(coeffs: &[f64]) -> Result<Self>;

    /// Evaluates the model.
    fn eval(&self, angles: &PhotometricAngles, phase: PhaseCoeffs) -> Result<Reflectance>;
}

// Checks that the buffer holds enough coefficients for `P`:
fn leading_coeffs<P: Photometry>(coeffs: &[f64]) -> Result<&[f64]> {
    if coeffs.len() < P::NUM_COEFFS {
        return Err(Error::CoefficientCount {
            model: P::NAME,
            expected: P::NUM_COEFFS,
            actual: coeffs.len(),
        });
    }
    Ok(&coeffs[..P::NUM_COEFFS])
}

/// The model identifiers a configuration can select. The numeric ids are
/// the ones used by existing configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReflectanceType {
    None,
    Lambert,
    LunarLambert,
    Hapke,
    ArbitraryModel,
    Charon,
    Mmpf,
}

impl ReflectanceType {
    /// Unknown ids map to `None`, which turns shading off.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => ReflectanceType::Lambert,
            2 => ReflectanceType::LunarLambert,
            3 => ReflectanceType::Hapke,
            4 => ReflectanceType::ArbitraryModel,
            5 => ReflectanceType::Charon,
            6 => ReflectanceType::Mmpf,
            _ => ReflectanceType::None,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            ReflectanceType::None => 0,
            ReflectanceType::Lambert => 1,
            ReflectanceType::LunarLambert => 2,
            ReflectanceType::Hapke => 3,
            ReflectanceType::ArbitraryModel => 4,
            ReflectanceType::Charon => 5,
            ReflectanceType::Mmpf => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReflectanceType::None => "none",
            ReflectanceType::Lambert => "lambert",
            ReflectanceType::LunarLambert => LunarLambert::NAME,
            ReflectanceType::Hapke => Hapke::NAME,
            ReflectanceType::ArbitraryModel => ExperimentalLunarLambert::NAME,
            ReflectanceType::Charon => Charon::NAME,
            ReflectanceType::Mmpf => Mmpf::NAME,
        }
    }
}

impl fmt::Display for ReflectanceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReflectanceType {
    type Err = SimpleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "none" => Ok(ReflectanceType::None),
            "lambert" | "lambertian" => Ok(ReflectanceType::Lambert),
            "lunar_lambert" | "lunar_lambertian" => Ok(ReflectanceType::LunarLambert),
            "hapke" => Ok(ReflectanceType::Hapke),
            "arbitrary_model" | "experimental_lunar_lambert" => {
                Ok(ReflectanceType::ArbitraryModel)
            }
            "charon" => Ok(ReflectanceType::Charon),
            "mmpf" => Ok(ReflectanceType::Mmpf),
            _ => Err(SimpleError::new(format!("unknown reflectance type: {}", s))),
        }
    }
}

/// A reflectance model together with its coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReflectanceModel {
    /// Shading is disabled, reflectance is always 1.
    None,
    Lambert,
    LunarLambert(LunarLambert),
    ExperimentalLunarLambert(ExperimentalLunarLambert),
    Hapke(Hapke),
    Charon(Charon),
    Mmpf(Mmpf),
}

impl ReflectanceModel {
    /// Interprets a flat coefficient buffer according to `model_type`. The
    /// buffer may be longer than the model needs.
    pub fn from_coeffs(model_type: ReflectanceType, coeffs: &[f64]) -> Result<Self> {
        Ok(match model_type {
            ReflectanceType::None => ReflectanceModel::None,
            ReflectanceType::Lambert => ReflectanceModel::Lambert,
            ReflectanceType::LunarLambert => {
                ReflectanceModel::LunarLambert(LunarLambert::from_coeffs(coeffs)?)
            }
            ReflectanceType::ArbitraryModel => ReflectanceModel::ExperimentalLunarLambert(
                ExperimentalLunarLambert::from_coeffs(coeffs)?,
            ),
            ReflectanceType::Hapke => ReflectanceModel::Hapke(Hapke::from_coeffs(coeffs)?),
            ReflectanceType::Charon => ReflectanceModel::Charon(Charon::from_coeffs(coeffs)?),
            ReflectanceType::Mmpf => ReflectanceModel::Mmpf(Mmpf::from_coeffs(coeffs)?),
        })
    }

    pub fn model_type(&self) -> ReflectanceType {
        match self {
            ReflectanceModel::None => ReflectanceType::None,
            ReflectanceModel::Lambert => ReflectanceType::Lambert,
            ReflectanceModel::LunarLambert(_) => ReflectanceType::LunarLambert,
            ReflectanceModel::ExperimentalLunarLambert(_) => ReflectanceType::ArbitraryModel,
            ReflectanceModel::Hapke(_) => ReflectanceType::Hapke,
            ReflectanceModel::Charon(_) => ReflectanceType::Charon,
            ReflectanceModel::Mmpf(_) => ReflectanceType::Mmpf,
        }
    }

    /// Computes the reflectance of `sample` as seen under `illum`.
    pub fn reflectance(
        &self,
        illum: Illumination,
        sample: GeometrySample,
        phase: PhaseCoeffs,
    ) -> Result<Reflectance> {
        match self {
            ReflectanceModel::None => Ok(Reflectance::neutral()),
            // Lambert doesn't need the photometric angles (nor a unit normal):
            ReflectanceModel::Lambert => Ok(Reflectance {
                value: lambert::reflectance(illum.sun, sample.xyz, sample.normal),
                phase_angle: None,
            }),
            ReflectanceModel::LunarLambert(m) => eval_photometry(m, illum, sample, phase),
            ReflectanceModel::ExperimentalLunarLambert(m) => {
                eval_photometry(m, illum, sample, phase)
            }
            ReflectanceModel::Hapke(m) => eval_photometry(m, illum, sample, phase),
            ReflectanceModel::Charon(m) => eval_photometry(m, illum, sample, phase),
            ReflectanceModel::Mmpf(m) => eval_photometry(m, illum, sample, phase),
        }
    }
}

fn eval_photometry<P: Photometry>(
    model: &P,
    illum: Illumination,
    sample: GeometrySample,
    phase: PhaseCoeffs,
) -> Result<Reflectance> {
    let angles = PhotometricAngles::new(illum, sample)?;
    model.eval(&angles, phase)
}

/// Computes the ground reflectance at `xyz` with the desired model.
pub fn calc_reflectance(
    camera_position: Vec3<f64>,
    normal: Vec3<f64>,
    xyz: Vec3<f64>,
    sun_position: Vec3<f64>,
    model: &ReflectanceModel,
    phase: PhaseCoeffs,
) -> Result<Reflectance> {
    let illum = Illumination {
        sun: sun_position,
        viewer: camera_position,
    };
    model.reflectance(illum, GeometrySample { xyz, normal }, phase)
}

/// Same as `calc_reflectance`, but with the model given as a numeric id and a
/// flat coefficient buffer. An unknown id gives the neutral reflectance.
pub fn calc_reflectance_raw(
    camera_position: Vec3<f64>,
    normal: Vec3<f64>,
    xyz: Vec3<f64>,
    sun_position: Vec3<f64>,
    model_index: i32,
    phase: PhaseCoeffs,
    coeffs: &[f64],
) -> Result<Reflectance> {
    let model_type = ReflectanceType::from_index(model_index);
    if model_type == ReflectanceType::None {
        trace!(model_index, "no reflectance model selected, using neutral reflectance");
        return Ok(Reflectance::neutral());
    }
    let model = ReflectanceModel::from_coeffs(model_type, coeffs)?;
    calc_reflectance(camera_position, normal, xyz, sun_position, &model, phase)
}
