//! Ear-clipping triangulation of a simple counter-clockwise polygon, O(n^2).

use alloc::vec::Vec;
use log::{debug, trace};
use num_traits::float::Float;

use crate::{area, holes, is_inside_triangle, is_reflex, Error, Point};

macro_rules! node {
    ($nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index < $nodes.len());
            $nodes.get_unchecked($index)
        }
    };
}

macro_rules! node_mut {
    ($nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index < $nodes.len());
            $nodes.get_unchecked_mut($index)
        }
    };
}

type NodeIndex = usize;

struct Node<T> {
    /// vertex coordinates
    p: Point<T>,
    /// previous vertex node in the polygon ring
    prev_i: NodeIndex,
    /// next vertex node in the polygon ring
    next_i: NodeIndex,
}

/// Instance of the ear-clipping triangulator.
pub struct Triangulator<T: Float> {
    nodes: Vec<Node<T>>,
}

impl<T: Float> Default for Triangulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Triangulator<T> {
    /// Creates a new triangulator.
    ///
    /// You can reuse a single instance for multiple triangulations to reduce memory allocations.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Triangulates a simple counter-clockwise polygon.
    ///
    /// Triangles are written to `triangles_out` as `[ax, ay, bx, by, cx, cy]` runs in
    /// counter-clockwise order. Degenerate ears (zero or negative area) are dropped, so there
    /// may be fewer than `n - 2` triangles. On error `triangles_out` is left empty.
    pub fn triangulate(
        &mut self,
        boundary: &[Point<T>],
        triangles_out: &mut Vec<T>,
    ) -> Result<(), Error> {
        triangles_out.clear();
        if boundary.len() < 3 {
            return Err(Error::TooFewVertices(boundary.len()));
        }
        triangles_out.reserve((boundary.len() - 2) * 6);

        self.linked_list(boundary);
        let result = earclip_linked(&mut self.nodes, 0, triangles_out);
        if let Err(err) = result {
            debug!("triangulation of {} points aborted: {}", boundary.len(), err);
            triangles_out.clear();
        }
        result
    }

    /// Joins the holes into the outer ring (the first boundary) and triangulates the result.
    pub fn triangulate_with_holes<B: AsRef<[Point<T>]>>(
        &mut self,
        boundaries: &[B],
        triangles_out: &mut Vec<T>,
    ) -> Result<(), Error> {
        triangles_out.clear();
        match boundaries {
            [] => Err(Error::EmptyInput),
            [outer] => self.triangulate(outer.as_ref(), triangles_out),
            _ => {
                let joined = holes::join_holes(boundaries)?;
                self.triangulate(&joined, triangles_out)
            }
        }
    }

    /// create a circular doubly linked list from polygon points, in order
    fn linked_list(&mut self, points: &[Point<T>]) {
        let n = points.len();
        self.nodes.clear();
        self.nodes.reserve(n);
        self.nodes.extend(points.iter().enumerate().map(|(i, &p)| Node {
            p,
            prev_i: if i == 0 { n - 1 } else { i - 1 },
            next_i: if i == n - 1 { 0 } else { i + 1 },
        }));
    }
}

/// Triangulates a simple counter-clockwise polygon into a flat list of triangle coordinates.
pub fn triangulate<T: Float>(boundary: &[Point<T>]) -> Result<Vec<T>, Error> {
    let mut triangles = Vec::new();
    Triangulator::new().triangulate(boundary, &mut triangles)?;
    Ok(triangles)
}

/// main ear slicing loop which triangulates a polygon (given as a linked list)
fn earclip_linked<T: Float>(
    nodes: &mut [Node<T>],
    ear_i: NodeIndex,
    triangles: &mut Vec<T>,
) -> Result<(), Error> {
    let mut ear_i = ear_i;
    let mut stop_i = ear_i;

    // iterate through ears, slicing them one by one
    loop {
        let ear = node!(nodes, ear_i);
        if ear.prev_i == ear.next_i {
            return Ok(());
        }
        let pi = ear.prev_i;
        let ni = ear.next_i;

        if is_ear(nodes, ear_i) {
            let a = node!(nodes, pi).p;
            let b = ear.p;
            let c = node!(nodes, ni).p;

            // cut off the triangle
            if area(&[a, b, c]) > T::zero() {
                triangles.extend([a.x, a.y, b.x, b.y, c.x, c.y]);
            } else {
                trace!("dropping degenerate ear at node {}", ear_i);
            }

            remove_node(nodes, ear_i);
            (ear_i, stop_i) = (ni, ni);
            continue;
        }

        ear_i = ni;

        // if we looped through the whole remaining polygon and can't find any more ears
        if ear_i == stop_i {
            return Err(Error::StuckTriangulation);
        }
    }
}

/// check whether a polygon node forms a valid ear with adjacent nodes
fn is_ear<T: Float>(nodes: &[Node<T>], ear_i: NodeIndex) -> bool {
    let b = node!(nodes, ear_i);
    let a = node!(nodes, b.prev_i);
    let c = node!(nodes, b.next_i);

    if is_reflex(a.p, b.p, c.p) {
        return false;
    }

    // now make sure no reflex vertex lies inside the potential ear
    let mut r_i = c.next_i;
    while r_i != b.prev_i {
        let r = node!(nodes, r_i);
        if is_inside_triangle(a.p, b.p, c.p, r.p)
            && is_reflex(node!(nodes, r.prev_i).p, r.p, node!(nodes, r.next_i).p)
        {
            return false;
        }
        r_i = r.next_i;
    }
    true
}

fn remove_node<T>(nodes: &mut [Node<T>], p_i: NodeIndex) {
    let p = node!(nodes, p_i);
    let p_next_i = p.next_i;
    let p_prev_i = p.prev_i;

    node_mut!(nodes, p_next_i).prev_i = p_prev_i;
    node_mut!(nodes, p_prev_i).next_i = p_next_i;
}
