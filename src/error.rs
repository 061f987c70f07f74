//! Error types for the photometry core.

use simple_error::SimpleError;
use thiserror::Error;

/// Result type for photometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an `Error`, so a driver evaluating many pixels can
/// decide per category whether to abort the run or skip the sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The supplied geometry violates a precondition (non-unit normal).
    Geometry,
    /// An angle cosine fell outside of its valid domain.
    Domain,
    /// The model or haze configuration is malformed.
    Configuration,
    /// The geodetic transform capability failed.
    Transform,
}

/// Errors that can occur while computing reflectance or intensity
#[derive(Error, Debug)]
pub enum Error {
    /// Normal passed to a reflectance model is not unit length
    #[error("expecting unit normal in the reflectance computation, got squared length {len2}")]
    NonUnitNormal { len2: f64 },

    /// Cosine of the phase angle is outside of [-1, 1] beyond tolerance
    #[error("cosine of the phase angle out of range: {cos_alpha}")]
    PhaseAngleDomain { cos_alpha: f64 },

    /// Unsupported number of haze coefficients
    #[error("invalid number of haze coefficients: {0} (expecting at most 6)")]
    HazeCount(usize),

    /// Coefficient buffer too short for the selected model
    #[error("{model} model needs {expected} reflectance coefficients, got {actual}")]
    CoefficientCount {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The geodetic transform capability failed
    #[error("geodetic transform failed: {0}")]
    Geodetic(#[from] SimpleError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NonUnitNormal { .. } => ErrorKind::Geometry,
            Error::PhaseAngleDomain { .. } => ErrorKind::Domain,
            Error::HazeCount(_) | Error::CoefficientCount { .. } => ErrorKind::Configuration,
            Error::Geodetic(_) => ErrorKind::Transform,
        }
    }
}
