// The float trait the vectors and the photometric models are written
// against:

use num_traits;

/// Our own float trait on top of num_traits' one, carrying the constants
/// the photometric models need.
pub trait Float: num_traits::Float {
    const PI: Self;
    const INV_4PI: Self;
    const PI_OVER_2: Self;
    const DEG_PER_RAD: Self;
    const RAD_PER_DEG: Self;

    /// Converts an angle in radians to degrees using `DEG_PER_RAD`.
    fn to_deg(self) -> Self {
        self * Self::DEG_PER_RAD
    }

    /// Converts an angle in degrees to radians using `RAD_PER_DEG`.
    fn to_rad(self) -> Self {
        self * Self::RAD_PER_DEG
    }
}

impl Float for f64 {
    const PI: Self = 3.14159265358979323846;
    const INV_4PI: Self = 0.07957747154594766788;
    const PI_OVER_2: Self = 1.57079632679489661923;
    const DEG_PER_RAD: Self = 180. / Self::PI;
    const RAD_PER_DEG: Self = Self::PI / 180.;
}
