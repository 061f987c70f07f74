//! Photometric core of shape-from-shading terrain reconstruction.
//!
//! Given a DEM pixel, `geometry::point_and_normal` places it in 3D with an
//! outward normal. A `reflectance::ReflectanceModel` then predicts how bright
//! that terrain looks for a sun and camera position, and the `intensity`
//! functions turn the reflectance into an image intensity (or an observed
//! intensity back into an albedo). Everything here is a pure function of its
//! arguments, so it can be called from any number of threads at once.

pub mod config;
pub mod error;
pub mod geometry;
pub mod intensity;
pub mod reflectance;

pub use config::ReflParams;
pub use error::{Error, ErrorKind, Result};
pub use geometry::{point_and_normal, GeometrySample, GridSpacing, HeightSamples, Illumination};
pub use intensity::{calc_albedo, calc_intensity, nonlin_reflectance, Haze};
pub use reflectance::{
    calc_reflectance, calc_reflectance_raw, PhaseCoeffs, Reflectance, ReflectanceModel,
    ReflectanceType,
};

pub use pmath;
