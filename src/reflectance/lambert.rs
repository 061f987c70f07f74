//
// Lambertian Reflectance
//
// The cosine between the light direction and the surface normal. It has the
// same brightness from any angle you look at it, so the viewer doesn't matter.

use pmath::vector::Vec3;

/// Computes the Lambertian reflectance at `xyz` given the sun position.
/// The normal is taken as is, it isn't checked to be of unit length.
pub fn reflectance(sun_pos: Vec3<f64>, xyz: Vec3<f64>, normal: Vec3<f64>) -> f64 {
    let sun_dir = (sun_pos - xyz).normalize();
    sun_dir.dot(normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn overhead_sun_is_one() {
        let r = reflectance(
            Vec3::new(0., 0., 1e8),
            Vec3::new(0., 0., 10.),
            Vec3::new(0., 0., 1.),
        );
        assert_eq!(r, 1.);
    }

    #[test]
    fn grazing_and_behind() {
        let normal = Vec3::new(0., 0., 1.);
        let xyz = Vec3::zero();
        assert_relative_eq!(reflectance(Vec3::new(5., 0., 0.), xyz, normal), 0.);
        assert_relative_eq!(reflectance(Vec3::new(0., 0., -5.), xyz, normal), -1.);
    }

    #[test]
    fn normal_is_not_renormalized() {
        let r = reflectance(
            Vec3::new(0., 0., 1.),
            Vec3::zero(),
            Vec3::new(0., 0., 2.),
        );
        assert_eq!(r, 2.);
    }
}
