//! Conversion of geographic coordinates into a planar frame suitable for triangulation.

use core::f64::consts::PI;
use num_traits::float::Float;

use crate::Point;

/// Equatorial radius used by the spherical (web) Mercator projection, in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Projects a `(longitude, latitude)` pair in degrees to spherical Mercator meters.
///
/// Latitudes at the poles map to infinity; callers are expected to clip them beforehand.
pub fn degrees_to_meters(p: Point<f64>) -> Point<f64> {
    let x = p.x.to_radians() * EARTH_RADIUS;
    let y = (PI / 4.0 + p.y.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;
    Point::new(x, y)
}

/// Inverse of [`degrees_to_meters`].
pub fn meters_to_degrees(p: Point<f64>) -> Point<f64> {
    let lon = (p.x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (p.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    Point::new(lon, lat)
}
