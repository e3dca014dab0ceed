use std::f64::consts::TAU;

use earclip_rs::{area, deviation, join_holes, triangulate, Point};
use proptest::prelude::*;

/// Convex polygon with vertices on a circle, one per angular sector.
fn convex_polygon() -> impl Strategy<Value = Vec<Point<f64>>> {
    (3usize..40, 0.5f64..1000.0).prop_flat_map(|(n, radius)| {
        prop::collection::vec(0.0f64..0.5, n).prop_map(move |jitter| {
            let step = TAU / n as f64;
            jitter
                .iter()
                .enumerate()
                .map(|(i, j)| {
                    let angle = (i as f64 + j) * step;
                    Point::new(radius * angle.cos(), radius * angle.sin())
                })
                .collect()
        })
    })
}

/// Square with an axis-aligned rectangular hole strictly inside it.
fn square_with_hole() -> impl Strategy<Value = (Vec<Point<f64>>, Vec<Point<f64>>)> {
    (10.0f64..100.0, 0.01f64..0.9, 0.01f64..0.9, 0.01f64..0.99, 0.01f64..0.99).prop_map(
        |(w, x0, y0, x1, y1)| {
            let (x0, y0) = (x0 * w, y0 * w);
            let x1 = x0 + (w * 0.995 - x0) * x1;
            let y1 = y0 + (w * 0.995 - y0) * y1;
            let outer = vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, w),
                Point::new(0.0, w),
            ];
            let hole = vec![
                Point::new(x0, y0),
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1, y0),
            ];
            (outer, hole)
        },
    )
}

proptest! {
    #[test]
    fn convex_area_is_conserved(polygon in convex_polygon()) {
        let triangles = triangulate(&polygon).unwrap();
        prop_assert_eq!(triangles.len(), (polygon.len() - 2) * 6);
        let no_holes: &[Vec<Point<f64>>] = &[];
        prop_assert!(deviation(&polygon, no_holes, &triangles) < 1e-9);
    }

    #[test]
    fn triangles_use_input_vertices(polygon in convex_polygon()) {
        let triangles = triangulate(&polygon).unwrap();
        for t in triangles.chunks_exact(6) {
            let corners = [[t[0], t[1]], [t[2], t[3]], [t[4], t[5]]].map(Point::from);
            prop_assert!(area(&corners) > 0.0);
            for corner in &corners {
                prop_assert!(polygon.contains(corner));
            }
        }
    }

    #[test]
    fn hole_area_is_subtracted((outer, hole) in square_with_hole()) {
        let joined = join_holes(&[outer.clone(), hole.clone()]).unwrap();
        prop_assert_eq!(joined.len(), outer.len() + hole.len() + 2);

        let triangles = triangulate(&joined).unwrap();
        prop_assert!(triangles.len() <= (joined.len() - 2) * 6);
        prop_assert!(deviation(&outer, &[hole], &triangles) < 1e-9);
    }
}
