use earclip_rs::projection::degrees_to_meters;
use earclip_rs::{deviation, Point, Triangulator};
use std::fs;

fn load_fixture(name: &str, num_triangles: usize, expected_deviation: f64) {
    // load JSON
    type Coords = Vec<Vec<[f64; 2]>>;
    let s = fs::read_to_string("./tests/fixtures/".to_string() + name + ".json").unwrap();
    let rings = serde_json::from_str::<Coords>(&s).unwrap();

    // prepare input, treating the fixture as small offsets in degrees around a city block
    let boundaries: Vec<Vec<Point<f64>>> = rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .map(|[x, y]| degrees_to_meters(Point::new(19.9 + x * 1e-5, 50.06 + y * 1e-5)))
                .collect()
        })
        .collect();

    // triangulate
    let mut triangles = vec![];
    let mut triangulator = Triangulator::new();
    for _ in 0..500 {
        triangulator
            .triangulate_with_holes(&boundaries, &mut triangles)
            .unwrap();
    }

    // check
    assert!(triangles.len() == num_triangles * 6);
    if !triangles.is_empty() {
        assert!(deviation(&boundaries[0], &boundaries[1..], &triangles) <= expected_deviation);
    }
}

fn main() {
    load_fixture("hole-staircase", 32, 1e-9);
}
