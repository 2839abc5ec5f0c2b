mod support;

use glb_inspect::{
    GeometryError, GeometryKernel,
    mesh::Mesh,
    section::{scan_z, section, section_at_centroid},
};
use nalgebra::{Point3, Vector3};
use support::approx_eq;

#[test]
fn section_is_deterministic() {
    let mesh = Mesh::<()>::cylinder(2.0, 4.0, 32, None).unwrap();
    let origin = Point3::new(0.3, -0.1, 1.7);
    let normal = Vector3::new(0.2, 0.1, 1.0);
    let first = section(&mesh, origin, normal).unwrap();
    let second = section(&mesh, origin, normal).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn far_plane_is_empty() {
    let mesh = Mesh::<()>::cube(3.0, None).unwrap();
    let max_z = mesh.bounding_box().maxs.z;
    let cut = section(&mesh, Point3::new(0.0, 0.0, max_z + 1000.0), Vector3::z()).unwrap();
    assert!(cut.is_empty());
    assert_eq!(cut.total_length(), 0.0);
}

#[test]
fn cube_mid_cut_is_one_square_loop() {
    let edge = 3.0;
    let cube = Mesh::<()>::cube(edge, None).unwrap();
    let cut = section(&cube, Point3::new(0.0, 0.0, edge / 2.0), Vector3::z()).unwrap();
    assert_eq!(cut.len(), 1);
    assert!(cut.polylines[0].is_closed());
    assert!(approx_eq(cut.total_length(), 4.0 * edge, 1e-9));
    assert!(approx_eq(cut.enclosed_area(), edge * edge, 1e-9));
}

#[test]
fn centroid_cut_uses_centroid_height() {
    let cube = Mesh::<()>::cube(2.0, None).unwrap();
    let cut = section_at_centroid(&cube).unwrap();
    assert!(approx_eq(cut.plane.offset(), 1.0, 1e-9));
    assert!(approx_eq(cut.total_length(), 8.0, 1e-9));
}

#[test]
fn invalid_planes_are_rejected() {
    let cube = Mesh::<()>::cube(1.0, None).unwrap();
    let zero = section(&cube, Point3::origin(), Vector3::zeros());
    assert!(matches!(zero, Err(GeometryError::InvalidPlane { .. })));
    let nan = section(&cube, Point3::new(f64::NAN, 0.0, 0.0), Vector3::z());
    assert!(matches!(nan, Err(GeometryError::InvalidPlane { .. })));
    let inf_normal = section(&cube, Point3::origin(), Vector3::new(0.0, f64::INFINITY, 1.0));
    assert!(matches!(inf_normal, Err(GeometryError::InvalidPlane { .. })));
}

#[test]
fn scan_heights_are_interior_and_increasing() {
    let mesh = Mesh::<()>::cylinder(1.0, 5.0, 16, None).unwrap();
    let bb = mesh.bounding_box();
    let scan = scan_z(&mesh, 10).unwrap();
    assert_eq!(scan.len(), 10);
    assert!(!scan.degenerate);

    let heights: Vec<f64> = scan.heights().collect();
    assert!(heights.windows(2).all(|w| w[0] < w[1]));
    assert!(heights.iter().all(|&z| z > bb.mins.z && z < bb.maxs.z));
    assert!(approx_eq(heights[0], 5.0 / 11.0, 1e-12));
    assert_eq!(scan.found().count(), 10);
}

#[test]
fn scan_of_zero_slices_is_an_argument_error() {
    let mesh = Mesh::<()>::cube(1.0, None).unwrap();
    assert!(matches!(scan_z(&mesh, 0), Err(GeometryError::InvalidArgument(_))));
}

#[test]
fn flat_mesh_scan_is_empty_not_an_error() {
    let flat = Mesh::<()>::square(4.0, None).unwrap();
    let scan = scan_z(&flat, 7).unwrap();
    assert_eq!(scan.len(), 7);
    assert!(scan.degenerate);
    assert!(!scan.any_found());
    assert!(scan.slices.iter().all(|s| s.section.is_empty()));
}

#[test]
fn single_slice_cuts_mid_height() {
    let cube = Mesh::<()>::cube(4.0, None).unwrap();
    let scan = scan_z(&cube, 1).unwrap();
    assert_eq!(scan.len(), 1);
    assert!(approx_eq(scan.slices[0].height, 2.0, 1e-12));
    assert!(approx_eq(scan.slices[0].section.total_length(), 16.0, 1e-9));
}

#[test]
fn empty_mesh_sections_are_empty() {
    let empty = Mesh::<()>::empty(None);
    let cut = section_at_centroid(&empty).unwrap();
    assert!(cut.is_empty());
    let scan = scan_z(&empty, 3).unwrap();
    assert!(scan.degenerate);
    assert_eq!(scan.len(), 3);
}

#[test]
fn thin_plates_are_cut_at_the_slice_height() {
    let thickness = 1e-4;
    for width in [1.0, 1000.0] {
        let plate = Mesh::<()>::cuboid(width, width, thickness, None).unwrap();
        let scan = scan_z(&plate, 100).unwrap();
        assert!(!scan.degenerate);
        assert_eq!(scan.found().count(), 100);

        for slice in &scan.slices {
            assert!(slice.height > 0.0 && slice.height < thickness);
            for polyline in &slice.section.polylines {
                for v in polyline.vertices() {
                    assert!(
                        (v.z - slice.height).abs() <= 1e-6 * thickness,
                        "vertex at z={} in slice at {}",
                        v.z,
                        slice.height
                    );
                }
            }
            assert!(approx_eq(slice.section.total_length(), 4.0 * width, 1e-9 * width));
        }
    }
}
