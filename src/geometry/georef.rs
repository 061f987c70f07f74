//! The geodetic transform used to place DEM samples in 3D.
//!
//! The photometry code only needs two things from a georeference: turning a
//! pixel into a longitude/latitude and turning longitude/latitude/height into
//! a cartesian point. Drivers with a full projection library implement
//! `GeoReference` themselves; `EquirectGeoRef` covers the simple case of an
//! equirectangular grid on a spherical or ellipsoidal body.

use pmath::numbers::Float;
use pmath::vector::{Vec2, Vec3};
use simple_error::{bail, SimpleResult};

/// Converts DEM pixels to body-fixed cartesian coordinates.
pub trait GeoReference {
    /// Returns (longitude, latitude) in degrees of the center of pixel `pix`
    /// (x is the column, y the row).
    fn pixel_to_lonlat(&self, pix: Vec2<f64>) -> SimpleResult<Vec2<f64>>;
    /// Converts (longitude, latitude) in degrees and height above the datum in
    /// meters to a cartesian point.
    fn geodetic_to_cartesian(&self, llh: Vec3<f64>) -> SimpleResult<Vec3<f64>>;
}

/// A reference ellipsoid (or sphere, when both axes match).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datum {
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
}

impl Datum {
    pub const MOON_RADIUS: f64 = 1_737_400.0;

    pub fn sphere(radius: f64) -> Self {
        Datum {
            semi_major_axis: radius,
            semi_minor_axis: radius,
        }
    }

    /// The IAU spherical Moon.
    pub fn moon() -> Self {
        Self::sphere(Self::MOON_RADIUS)
    }

    pub fn wgs84() -> Self {
        Datum {
            semi_major_axis: 6_378_137.0,
            semi_minor_axis: 6_356_752.314_245,
        }
    }

    /// Squared eccentricity of the ellipsoid.
    pub fn eccentricity2(&self) -> f64 {
        let a2 = self.semi_major_axis * self.semi_major_axis;
        let b2 = self.semi_minor_axis * self.semi_minor_axis;
        1. - b2 / a2
    }

    /// Longitude and latitude are in degrees, height in meters above the
    /// ellipsoid.
    pub fn geodetic_to_cartesian(&self, llh: Vec3<f64>) -> SimpleResult<Vec3<f64>> {
        if !llh.is_finite() {
            bail!("non-finite geodetic coordinate {:?}", llh);
        }
        if llh.y < -90. || llh.y > 90. {
            bail!("latitude {} is outside of [-90, 90]", llh.y);
        }

        let lon = llh.x.to_rad();
        let lat = llh.y.to_rad();
        let h = llh.z;

        let e2 = self.eccentricity2();
        let (sin_lat, cos_lat) = lat.sin_cos();
        // Radius of curvature in the prime vertical:
        let n = self.semi_major_axis / (1. - e2 * sin_lat * sin_lat).sqrt();

        Ok(Vec3 {
            x: (n + h) * cos_lat * lon.cos(),
            y: (n + h) * cos_lat * lon.sin(),
            z: (n * (1. - e2) + h) * sin_lat,
        })
    }
}

/// A DEM grid with constant spacing in degrees. Columns grow eastward and rows
/// grow southward, as in a north-up image.
#[derive(Clone, Copy, Debug)]
pub struct EquirectGeoRef {
    pub datum: Datum,
    /// Longitude and latitude of the center of pixel (0, 0).
    pub origin: Vec2<f64>,
    /// Degrees per pixel along columns (x) and rows (y), both positive.
    pub pixel_size: Vec2<f64>,
}

impl EquirectGeoRef {
    pub fn new(datum: Datum, origin: Vec2<f64>, pixel_size: Vec2<f64>) -> Self {
        EquirectGeoRef {
            datum,
            origin,
            pixel_size,
        }
    }
}

impl GeoReference for EquirectGeoRef {
    fn pixel_to_lonlat(&self, pix: Vec2<f64>) -> SimpleResult<Vec2<f64>> {
        let lonlat = Vec2 {
            x: self.origin.x + pix.x * self.pixel_size.x,
            y: self.origin.y - pix.y * self.pixel_size.y,
        };
        if !lonlat.is_finite() {
            bail!("pixel {:?} maps to a non-finite lon-lat", pix);
        }
        Ok(lonlat)
    }

    fn geodetic_to_cartesian(&self, llh: Vec3<f64>) -> SimpleResult<Vec3<f64>> {
        self.datum.geodetic_to_cartesian(llh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sphere_equator_and_pole() {
        let moon = Datum::moon();
        let p = moon.geodetic_to_cartesian(Vec3::new(0., 0., 10.)).unwrap();
        assert_relative_eq!(p.x, Datum::MOON_RADIUS + 10., epsilon = 1e-6);
        assert_relative_eq!(p.y, 0., epsilon = 1e-6);
        assert_relative_eq!(p.z, 0., epsilon = 1e-6);

        let p = moon.geodetic_to_cartesian(Vec3::new(45., 90., 0.)).unwrap();
        assert_relative_eq!(p.z, Datum::MOON_RADIUS, epsilon = 1e-6);
        assert_relative_eq!(p.x, 0., epsilon = 1e-6);
    }

    #[test]
    fn wgs84_pole_uses_minor_axis() {
        let wgs84 = Datum::wgs84();
        let p = wgs84.geodetic_to_cartesian(Vec3::new(0., 90., 0.)).unwrap();
        assert_relative_eq!(p.z, wgs84.semi_minor_axis, epsilon = 1e-6);
        let p = wgs84.geodetic_to_cartesian(Vec3::new(90., 0., 0.)).unwrap();
        assert_relative_eq!(p.y, wgs84.semi_major_axis, epsilon = 1e-6);
    }

    #[test]
    fn rejects_bad_latitude() {
        let moon = Datum::moon();
        assert!(moon.geodetic_to_cartesian(Vec3::new(0., 91., 0.)).is_err());
        assert!(moon
            .geodetic_to_cartesian(Vec3::new(f64::NAN, 0., 0.))
            .is_err());
    }

    #[test]
    fn equirect_rows_go_south() {
        let geo = EquirectGeoRef::new(Datum::moon(), Vec2::new(10., 5.), Vec2::new(0.5, 0.25));
        let ll = geo.pixel_to_lonlat(Vec2::new(2., 4.)).unwrap();
        assert_relative_eq!(ll.x, 11.);
        assert_relative_eq!(ll.y, 4.);
    }
}
