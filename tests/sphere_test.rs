use approx::assert_relative_eq;
use eclipse_ngin::data_structures::sphere::SphereGeometry;

#[test]
fn vertex_and_index_counts() {
    for (w, h) in [(128, 128), (8, 6), (3, 2)] {
        let sphere = SphereGeometry::new(1.0, w, h);
        assert_eq!(sphere.vertices.len() as u32, (w + 1) * (h + 1));
        assert_eq!(sphere.indices.len() as u32, 3 * (2 * w * h - 2 * w));
    }
}

#[test]
fn segment_counts_are_clamped() {
    let sphere = SphereGeometry::new(1.0, 0, 0);
    assert_eq!(sphere.vertices.len(), 4 * 3);
}

#[test]
fn vertices_lie_on_the_sphere() {
    let radius = 1.2;
    let sphere = SphereGeometry::new(radius, 16, 12);
    for v in &sphere.vertices {
        let [x, y, z] = v.position;
        assert_relative_eq!((x * x + y * y + z * z).sqrt(), radius, epsilon = 1e-5);
        let [nx, ny, nz] = v.normal;
        assert_relative_eq!((nx * nx + ny * ny + nz * nz).sqrt(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn indices_are_in_range() {
    let sphere = SphereGeometry::new(1.0, 32, 16);
    let n = sphere.vertices.len() as u32;
    assert!(sphere.indices.iter().all(|&i| i < n));
}

#[test]
fn uv_covers_the_unit_square() {
    let sphere = SphereGeometry::new(1.0, 10, 5);
    let first = sphere.vertices.first().unwrap();
    let last = sphere.vertices.last().unwrap();
    assert_eq!(first.uv, [0.0, 1.0]);
    assert_eq!(last.uv, [1.0, 0.0]);
}
