//! Ear-clipping triangulation of simple polygons, with holes eliminated up front
//! by splicing each of them into the outer boundary through a visibility bridge.
//!
//! Boundaries are counter-clockwise rings of [`Point`]s without a closing duplicate.
//! Triangles come out as a flat list of coordinates, six per triangle.
//!
//! ```
//! use earclip_rs::{join_holes, triangulate, Point};
//!
//! let outer = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]].map(Point::from);
//! let hole = [[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0]].map(Point::from);
//!
//! let joined = join_holes(&[&outer[..], &hole[..]]).unwrap();
//! let triangles = triangulate(&joined).unwrap();
//! assert_eq!(triangles.len(), 8 * 6);
//! ```

#![no_std]

extern crate alloc;

pub mod earclip;
pub mod holes;
pub mod projection;

pub use earclip::{triangulate, Triangulator};
pub use holes::{find_bridge, join_holes, Bridge};

use core::ops::Sub;
use num_traits::float::Float;

/// Errors returned by hole joining and triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cannot process an empty list of boundaries")]
    EmptyInput,
    /// The ray cast from a hole ran along an outer edge; usually self-intersecting input.
    #[error("cannot calculate ray intersection, problematic data")]
    IntersectionUnresolvable,
    #[error("could not find an outer vertex visible from the hole")]
    NoVisibleVertex,
    #[error("cannot triangulate less than three points (got {0})")]
    TooFewVertices(usize),
    /// A full pass over the remaining vertices found no ear.
    #[error("triangulation got stuck, polygon is probably not simple")]
    StuckTriangulation,
}

/// A 2-D coordinate. Equality is exact floating-point equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T: Float> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// 2-D cross product (z component of the 3-D one).
    #[inline]
    pub fn cross(self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    /// Squared euclidean distance.
    #[inline]
    pub fn distance2(self, other: Self) -> T {
        let d = self - other;
        d.x * d.x + d.y * d.y
    }
}

impl<T: Float> Sub for Point<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<Point<T>> for [T; 2] {
    fn from(p: Point<T>) -> Self {
        [p.x, p.y]
    }
}

/// Signed area of a ring (shoelace formula); positive for counter-clockwise rings.
pub fn area<T: Float>(points: &[Point<T>]) -> T {
    let Some(&last) = points.last() else {
        return T::zero();
    };
    let mut prev = last;
    let mut sum = T::zero();
    for &p in points {
        sum = sum + prev.cross(p);
        prev = p;
    }
    sum / (T::one() + T::one())
}

/// Returns a relative difference between the polygon area (outer ring minus holes)
/// and the signed area of its triangulation; used to verify correctness of triangulation
pub fn deviation<T: Float, B: AsRef<[Point<T>]>>(
    outer: &[Point<T>],
    holes: &[B],
    triangles: &[T],
) -> T {
    let mut polygon_area = area(outer).abs();
    for hole in holes {
        let hole = hole.as_ref();
        if hole.len() >= 3 {
            polygon_area = polygon_area - area(hole).abs();
        }
    }

    let triangles_area = triangles
        .chunks_exact(6)
        .map(|t| {
            area(&[
                Point::new(t[0], t[1]),
                Point::new(t[2], t[3]),
                Point::new(t[4], t[5]),
            ])
        })
        .fold(T::zero(), |acc, a| acc + a);

    if polygon_area == T::zero() && triangles_area == T::zero() {
        T::zero()
    } else {
        ((polygon_area - triangles_area) / polygon_area).abs()
    }
}

/// check if the angle a-b-c turns clockwise; a straight angle counts as convex
#[inline]
pub(crate) fn is_reflex<T: Float>(a: Point<T>, b: Point<T>, c: Point<T>) -> bool {
    (b - a).cross(c - b) < T::zero()
}

/// check if p lies within the counter-clockwise triangle a-b-c, edges included
#[inline]
pub(crate) fn is_inside_triangle<T: Float>(
    a: Point<T>,
    b: Point<T>,
    c: Point<T>,
    p: Point<T>,
) -> bool {
    (c - p).cross(a - p) >= T::zero()
        && (a - p).cross(b - p) >= T::zero()
        && (b - p).cross(c - p) >= T::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    #[test]
    fn area_of_quad() {
        let points = [p(2., 2.), p(11., 2.), p(9., 7.), p(4., 10.)];
        assert_eq!(area(&points), 45.5);
        let mut reversed = points;
        reversed.reverse();
        assert_eq!(area(&reversed), -45.5);
        assert_eq!(area::<f64>(&[]), 0.0);
    }

    #[test]
    fn reflex_angles() {
        assert!(!is_reflex(p(0., 1.), p(1., 0.), p(2., 1.)));
        assert!(is_reflex(p(0., 0.), p(0., 3.), p(2., 3.)));
        assert!(!is_reflex(p(1., 1.), p(0., 1.), p(0., 0.)));
        assert!(is_reflex(p(0., 0.), p(2., 3.), p(4., 2.)));
        // straight angle
        assert!(!is_reflex(p(0., 0.), p(1., 0.), p(2., 0.)));
    }

    #[test]
    fn inside_triangle() {
        assert!(!is_inside_triangle(p(0., 0.), p(4., 0.), p(4., 2.), p(2., 2.)));
        assert!(is_inside_triangle(p(0., 0.), p(3., 0.), p(3., 3.), p(1., 1.)));
        assert!(is_inside_triangle(p(0., 2.), p(6., 0.), p(6., 2.), p(2., 2.)));
        assert!(is_inside_triangle(p(0., 0.), p(3., 0.), p(3., 3.), p(3., 3.)));
    }

    #[test]
    fn point_ops() {
        let a = p(3., 4.);
        let b = p(1., 1.);
        assert_eq!(a - b, p(2., 3.));
        assert_eq!(p(1., 0.).cross(p(0., 1.)), 1.0);
        assert_eq!(a.distance2(b), 13.0);
        assert_eq!(Point::from([3., 4.]), a);
        assert_eq!(<[f64; 2]>::from(a), [3., 4.]);
    }

    #[test]
    fn deviation_of_fan() {
        let data = [p(0., 4.), p(3., 1.), p(8., 2.), p(9., 5.), p(4., 6.)];
        let triangles = [
            4., 6., 0., 4., 3., 1., 4., 6., 3., 1., 8., 2., 8., 2., 9., 5., 4., 6.,
        ];
        let holes: &[&[Point<f64>]] = &[];
        assert_eq!(deviation(&data, holes, &triangles), 0.0);
        assert!(deviation(&data, holes, &triangles[..12]) > 0.0);
    }
}
