//! Small math library used by the photometry code: generic vectors and
//! the float constants the reflectance laws need.

pub mod numbers;
pub mod vector;
