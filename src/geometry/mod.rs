pub mod georef;

pub use georef::{Datum, EquirectGeoRef, GeoReference};

use crate::error::Result;
use pmath::vector::{Vec2, Vec3};

/// A point on the terrain together with its outward unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySample {
    pub xyz: Vec3<f64>,
    pub normal: Vec3<f64>,
}

/// Positions of the sun and of the camera, in the same frame as the terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Illumination {
    pub sun: Vec3<f64>,
    pub viewer: Vec3<f64>,
}

/// DEM grid spacing, in the units the slope partials are expressed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpacing {
    pub x: f64,
    pub y: f64,
}

/// The heights used to estimate the normal at a DEM pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeightSamples {
    /// Heights of the pixel and of its four direct neighbors.
    Neighbors {
        left: f64,
        center: f64,
        right: f64,
        top: f64,
        bottom: f64,
    },
    /// Center height and the partial derivatives of the height along
    /// columns (`p`) and rows (`q`).
    Slopes { center: f64, p: f64, q: f64 },
}

impl HeightSamples {
    /// Returns (left, center, right, top, bottom). The slopes are
    /// p = (right - left) / (2 * gridx), hence right = center + gridx * p and
    /// so on for the other neighbors.
    fn neighbors(self, spacing: GridSpacing) -> (f64, f64, f64, f64, f64) {
        match self {
            HeightSamples::Neighbors {
                left,
                center,
                right,
                top,
                bottom,
            } => (left, center, right, top, bottom),
            HeightSamples::Slopes { center, p, q } => (
                center - spacing.x * p,
                center,
                center + spacing.x * p,
                center + spacing.y * q,
                center - spacing.y * q,
            ),
        }
    }
}

// Places pixel (col, row) with the given height in 3D:
fn pixel_to_xyz<G: GeoReference + ?Sized>(
    geo: &G,
    col: f64,
    row: f64,
    height: f64,
) -> Result<Vec3<f64>> {
    let lonlat = geo.pixel_to_lonlat(Vec2 { x: col, y: row })?;
    let xyz = geo.geodetic_to_cartesian(Vec3::from_vec2(lonlat, height))?;
    Ok(xyz)
}

/// Computes the cartesian position of DEM pixel (`col`, `row`) and its
/// normal. The normal is estimated with a centered four-point difference and
/// points away from the body center.
pub fn point_and_normal<G: GeoReference + ?Sized>(
    col: i32,
    row: i32,
    heights: HeightSamples,
    spacing: GridSpacing,
    geo: &G,
) -> Result<GeometrySample> {
    let (left_h, center_h, right_h, top_h, bottom_h) = heights.neighbors(spacing);
    let (col, row) = (col as f64, row as f64);

    let xyz = pixel_to_xyz(geo, col, row, center_h)?;
    let left = pixel_to_xyz(geo, col - 1., row, left_h)?;
    let right = pixel_to_xyz(geo, col + 1., row, right_h)?;
    let bottom = pixel_to_xyz(geo, col, row + 1., bottom_h)?;
    let top = pixel_to_xyz(geo, col, row - 1., top_h)?;

    let dx = right - left;
    let dy = bottom - top;

    // so the normal points up:
    let normal = -dx.cross(dy).normalize();

    Ok(GeometrySample { xyz, normal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    // A quarter degree grid whose pixel (10, 10) sits at lon 0, lat 0:
    fn equator_geo() -> EquirectGeoRef {
        EquirectGeoRef::new(
            Datum::moon(),
            Vec2::new(-2.5, 2.5),
            Vec2::new(0.25, 0.25),
        )
    }

    #[test]
    fn flat_terrain_normal_points_outward() {
        let geo = equator_geo();
        let heights = HeightSamples::Neighbors {
            left: 100.,
            center: 100.,
            right: 100.,
            top: 100.,
            bottom: 100.,
        };
        let spacing = GridSpacing { x: 1., y: 1. };
        let sample = point_and_normal(10, 10, heights, spacing, &geo).unwrap();

        assert_relative_eq!(sample.xyz.x, Datum::MOON_RADIUS + 100., epsilon = 1e-6);
        assert_relative_eq!(sample.xyz.y, 0., epsilon = 1e-6);
        assert_relative_eq!(sample.xyz.z, 0., epsilon = 1e-6);

        assert_relative_eq!(sample.normal.x, 1., epsilon = 1e-12);
        assert_relative_eq!(sample.normal.y, 0., epsilon = 1e-12);
        assert_relative_eq!(sample.normal.z, 0., epsilon = 1e-12);
        assert_relative_eq!(sample.normal.length(), 1., epsilon = 1e-12);
    }

    #[test]
    fn east_facing_slope_tilts_normal_east() {
        let geo = equator_geo();
        // Terrain rising toward the west faces east (+y at lon 0):
        let heights = HeightSamples::Neighbors {
            left: 600.,
            center: 100.,
            right: -400.,
            top: 100.,
            bottom: 100.,
        };
        let spacing = GridSpacing { x: 1., y: 1. };
        let sample = point_and_normal(10, 10, heights, spacing, &geo).unwrap();
        assert!(sample.normal.y > 0.);
        assert!(sample.normal.x > 0.);
        assert_relative_eq!(sample.normal.z, 0., epsilon = 1e-12);
    }

    #[test]
    fn slopes_match_explicit_neighbors() {
        let geo = equator_geo();
        let spacing = GridSpacing { x: 2., y: 3. };
        let (center, p, q) = (50., 4., -7.);
        let from_slopes =
            point_and_normal(10, 10, HeightSamples::Slopes { center, p, q }, spacing, &geo)
                .unwrap();
        let explicit = HeightSamples::Neighbors {
            left: center - 2. * p,
            center,
            right: center + 2. * p,
            top: center + 3. * q,
            bottom: center - 3. * q,
        };
        let from_neighbors = point_and_normal(10, 10, explicit, spacing, &geo).unwrap();
        assert_eq!(from_slopes, from_neighbors);
    }

    #[test]
    fn transform_failures_propagate() {
        // Row 0 of this grid is at the north pole, so its top neighbor is past it:
        let geo = EquirectGeoRef::new(Datum::moon(), Vec2::new(0., 90.), Vec2::new(1., 1.));
        let heights = HeightSamples::Slopes {
            center: 0.,
            p: 0.,
            q: 0.,
        };
        let err = point_and_normal(0, 0, heights, GridSpacing { x: 1., y: 1. }, &geo)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transform);
    }
}
