mod support;

use glb_inspect::{
    GeometryError, GeometryKernel,
    mesh::Mesh,
    summary::{summarize, summarize_nth},
};
use nalgebra::Point3;
use support::approx_eq;

#[test]
fn counts_match_the_mesh_exactly() {
    let meshes = [
        Mesh::<()>::cube(1.0, None).unwrap(),
        Mesh::tetrahedron(2.0, None).unwrap(),
        Mesh::cylinder(1.0, 3.0, 24, None).unwrap(),
        Mesh::square(5.0, None).unwrap(),
        Mesh::empty(None),
    ];
    for mesh in &meshes {
        let summary = summarize(mesh).unwrap();
        assert_eq!(summary.vertex_count, mesh.vertices().len());
        assert_eq!(summary.face_count, mesh.faces().len());
        assert_eq!(summary.normal_count, mesh.vertices().len());
    }
}

#[test]
fn tetrahedron_measures() {
    let summary = summarize(&Mesh::<()>::tetrahedron(3.0, None).unwrap()).unwrap();
    assert!(approx_eq(summary.volume, 4.5, 1e-9));
    // three right triangles plus the equilateral face with side 3*sqrt(2)
    let expected_area = 3.0 * 4.5 + (3.0 as f64).sqrt() / 4.0 * 18.0;
    assert!(approx_eq(summary.surface_area, expected_area, 1e-9));
    assert_eq!(summary.bounding_box.max, [3.0, 3.0, 3.0]);
}

#[test]
fn open_surface_volume_passes_through() {
    let summary = summarize(&Mesh::<()>::square(2.0, None).unwrap()).unwrap();
    assert!(approx_eq(summary.surface_area, 4.0, 1e-12));
    assert!(approx_eq(summary.volume, 0.0, 1e-12));
    assert_eq!(summary.bounding_box.dimensions(), [2.0, 2.0, 0.0]);
}

#[test]
fn cylinder_volume_approaches_pi_r2_h() {
    let summary = summarize(&Mesh::<()>::cylinder(1.0, 2.0, 256, None).unwrap()).unwrap();
    assert!(approx_eq(summary.volume, 2.0 * std::f64::consts::PI, 1e-3));
}

#[test]
fn malformed_face_is_rejected_at_construction() {
    let result = Mesh::<()>::new(
        vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
        vec![[0, 1, 2]],
        None,
    );
    assert!(matches!(result, Err(GeometryError::InvalidMesh(_))));
}

#[test]
fn absent_mesh_is_invalid() {
    let meshes: Vec<Mesh<()>> = Vec::new();
    assert!(matches!(summarize_nth(&meshes, 0), Err(GeometryError::InvalidMesh(_))));
}

#[test]
fn summary_serializes_to_json() {
    let summary = summarize(&Mesh::<()>::cube(1.0, None).unwrap()).unwrap();
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["vertex_count"], 8);
    assert_eq!(value["bounding_box"]["max"][2], 1.0);
}

#[test]
fn non_finite_shape_is_not_summarized_as_empty() {
    let result = Mesh::<()>::cube(f64::NAN, None).and_then(|cube| summarize(&cube));
    assert!(matches!(result, Err(GeometryError::InvalidMesh(_))));
}
