//! Hole elimination: every hole is spliced into the outer boundary through a pair of
//! zero-width bridge edges, producing a single ring that the ear clipper accepts.

use alloc::vec::Vec;
use core::cmp::Ordering;
use log::{debug, trace};
use num_traits::float::Float;

use crate::{is_inside_triangle, is_reflex, Error, Point};

/// A pair of mutually visible vertices, one on the hole and one on the outer ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    /// index of the hole vertex with the greatest x
    pub hole_index: usize,
    /// index of the outer vertex visible from it
    pub outer_index: usize,
}

/// Point where the ray cast from a hole meets the outer ring.
struct RayHit<T> {
    k: Point<T>,
    /// parameter along the ray, equal to the distance from its origin
    t: T,
    k1: usize,
    k2: usize,
}

/// Removes holes, joining them with the rest of the polygon.
///
/// The first boundary is the outer ring, the rest are holes. Holes are processed in
/// ascending order of their greatest x, each one against the boundary accumulated so far.
pub fn join_holes<T: Float, B: AsRef<[Point<T>]>>(
    boundaries: &[B],
) -> Result<Vec<Point<T>>, Error> {
    let Some((outer, holes)) = boundaries.split_first() else {
        return Err(Error::EmptyInput);
    };
    let mut current = outer.as_ref().to_vec();

    let holes = sort_by_max_x(holes);
    let num_holes = holes.len();
    for (i, hole) in holes.into_iter().enumerate() {
        if hole.is_empty() {
            debug!("skipping empty hole {}/{}", i + 1, num_holes);
            continue;
        }
        debug!(
            "joining hole {}/{} ({} points) into boundary of {} points",
            i + 1,
            num_holes,
            hole.len(),
            current.len()
        );
        current = match combine(&current, hole) {
            Ok(joined) => joined,
            Err(err) => {
                debug!("hole {}/{} could not be joined: {}", i + 1, num_holes, err);
                return Err(err);
            }
        };
    }

    Ok(current)
}

/// holes ordered by their greatest x, ties keeping input order
fn sort_by_max_x<T: Float, B: AsRef<[Point<T>]>>(holes: &[B]) -> Vec<&[Point<T>]> {
    let mut keyed: Vec<(T, &[Point<T>])> = holes
        .iter()
        .map(|hole| {
            let hole = hole.as_ref();
            (max_x(hole), hole)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, hole)| hole).collect()
}

fn max_x<T: Float>(points: &[Point<T>]) -> T {
    points.iter().fold(T::neg_infinity(), |acc, p| acc.max(p.x))
}

/// index of the first vertex with the greatest x
fn rightmost<T: Float>(points: &[Point<T>]) -> usize {
    let mut m_i = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.x > points[m_i].x {
            m_i = i;
        }
    }
    m_i
}

/// splice the hole into the outer ring through the bridge, walking the bridge twice
fn combine<T: Float>(outer: &[Point<T>], hole: &[Point<T>]) -> Result<Vec<Point<T>>, Error> {
    let Bridge {
        hole_index: m,
        outer_index: v,
    } = find_bridge(outer, hole)?;

    let mut result = Vec::with_capacity(outer.len() + hole.len() + 2);
    result.extend_from_slice(&outer[..=v]);
    result.extend_from_slice(&hole[m..]);
    result.extend_from_slice(&hole[..m]);
    result.extend([hole[m], outer[v]]);
    result.extend_from_slice(&outer[v + 1..]);
    Ok(result)
}

/// Finds a hole vertex `M` and an outer vertex mutually visible with it.
///
/// `M` is the hole vertex with the greatest x. A ray is cast from `M` in the +x direction;
/// if it hits an outer vertex directly, that vertex is the answer. Otherwise the hit edge's
/// endpoint `P` with the greater x is visible unless another outer vertex lies in the
/// triangle `[M, K, P]`, in which case one of the reflex vertices inside it is chosen.
pub fn find_bridge<T: Float>(outer: &[Point<T>], hole: &[Point<T>]) -> Result<Bridge, Error> {
    if hole.is_empty() {
        return Err(Error::NoVisibleVertex);
    }
    let hole_index = rightmost(hole);
    let m = hole[hole_index];

    let Some(RayHit { k, t, k1, k2 }) = find_k(m, outer)? else {
        trace!("ray from ({:?}, {:?}) hits nothing", m.x.to_f64(), m.y.to_f64());
        return Err(Error::NoVisibleVertex);
    };
    trace!("ray hits edge [{}, {}] at distance {:?}", k1, k2, t.to_f64());

    // K is a vertex of the outer ring
    if let Some(outer_index) = outer.iter().rposition(|&v| v == k) {
        trace!("ray hits vertex {} directly", outer_index);
        return Ok(Bridge {
            hole_index,
            outer_index,
        });
    }

    // K is interior to [V_k1, V_k2]
    let p_i = if outer[k1].x > outer[k2].x { k1 } else { k2 };
    let p = outer[p_i];
    // counter-clockwise whichever side of the ray P is on
    let triangle = if p.y < m.y { [m, p, k] } else { [m, k, p] };
    if are_all_outside(triangle, p, outer) {
        trace!("edge endpoint {} is visible", p_i);
        return Ok(Bridge {
            hole_index,
            outer_index: p_i,
        });
    }

    let outer_index = find_reflex(triangle, outer);
    trace!("picked reflex vertex {} inside [M, K, P]", outer_index);
    Ok(Bridge {
        hole_index,
        outer_index,
    })
}

/// Finds the closest edge crossed by the ray `M + t * (1, 0)`.
///
/// Only edges whose first point is not above `M` and second point is not below it
/// are considered.
fn find_k<T: Float>(m: Point<T>, outer: &[Point<T>]) -> Result<Option<RayHit<T>>, Error> {
    let n = outer.len();
    let mut best: Option<RayHit<T>> = None;

    for j in 0..n {
        let i = if j == 0 { n - 1 } else { j - 1 };
        let (vi, vj) = (outer[i], outer[j]);
        if vi.y > m.y || vj.y < m.y {
            continue;
        }

        let v1 = m - vi;
        let v2 = vj - vi;

        if v2.y == T::zero() {
            // edge lies on the ray's line
            if vi.x.max(vj.x) < m.x {
                continue;
            }
            return Err(Error::IntersectionUnresolvable);
        }

        let t1 = v2.cross(v1) / v2.y;
        let t2 = v1.y / v2.y;
        if !t1.is_finite() || !t2.is_finite() {
            return Err(Error::IntersectionUnresolvable);
        }

        let closer = best.as_ref().map_or(true, |b| t1 < b.t);
        if t1 >= T::zero() && t2 >= T::zero() && t2 <= T::one() && closer {
            best = Some(RayHit {
                k: Point::new(m.x + t1, m.y),
                t: t1,
                k1: i,
                k2: j,
            });
        }
    }

    Ok(best)
}

/// check that no outer vertex other than P lies within [M, K, P]
fn are_all_outside<T: Float>(triangle: [Point<T>; 3], p: Point<T>, outer: &[Point<T>]) -> bool {
    let [a, b, c] = triangle;
    outer.iter().all(|&v| v == p || !is_inside_triangle(a, b, c, v))
}

/// Picks among the reflex vertices inside `[M, K, P]`.
///
/// Distances are measured against the running pick (starting at vertex 0), not `M`;
/// the farthest one wins. Falls back to vertex 0 when there is no such vertex.
fn find_reflex<T: Float>(triangle: [Point<T>; 3], outer: &[Point<T>]) -> usize {
    let [a, b, c] = triangle;
    let n = outer.len();
    let mut closest = 0;
    let mut max_dist = T::zero();

    for (i, &v) in outer.iter().enumerate() {
        let prev = outer[(i + n - 1) % n];
        let next = outer[(i + 1) % n];
        if !is_inside_triangle(a, b, c, v) || !is_reflex(prev, v, next) {
            continue;
        }
        let dist = v.distance2(outer[closest]);
        if dist > max_dist {
            closest = i;
            max_dist = dist;
        }
    }
    closest
}
