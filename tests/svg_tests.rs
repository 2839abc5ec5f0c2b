mod support;

use glb_inspect::{
    GeometryKernel,
    io::svg::{depth_svg, save, scan_svg, section_svg, top_down_svg, viridis},
    mesh::Mesh,
    projection::{padded_xy_bounds, project_with_depth},
    section::{scan_z, section_at_centroid},
};
use support::temp_path;

#[test]
fn top_down_draws_edges_and_vertices() {
    let text = top_down_svg(&Mesh::<()>::cube(1.0, None).unwrap()).to_string();
    assert!(text.contains("<svg"));
    assert_eq!(text.matches("<path").count(), 1);
    assert_eq!(text.matches("<circle").count(), 8);
}

#[test]
fn depth_plot_colors_by_z() {
    let cube = Mesh::<()>::cube(2.0, None).unwrap();
    let text = depth_svg(&project_with_depth(&cube), "cube").to_string();
    assert_eq!(text.matches("<circle").count(), 8);
    assert!(text.contains(&format!("fill=\"{}\"", viridis(0.0))));
    assert!(text.contains(&format!("fill=\"{}\"", viridis(1.0))));
    assert!(text.contains("color-bar"));
}

#[test]
fn scan_plot_has_one_path_per_found_slice() {
    let cube = Mesh::<()>::cube(2.0, None).unwrap();
    let scan = scan_z(&cube, 5).unwrap();
    let text = scan_svg(&scan, &cube.bounding_box()).to_string();
    assert_eq!(text.matches("<path").count(), 5);
}

#[test]
fn empty_section_plot_has_no_paths() {
    let flat = Mesh::<()>::square(1.0, None).unwrap();
    let cut = section_at_centroid(&flat).unwrap();
    let doc = section_svg(&cut, &padded_xy_bounds(&flat.bounding_box(), 0.1));
    assert_eq!(doc.to_string().matches("<path").count(), 0);
}

#[test]
fn save_writes_file() {
    let path = temp_path("save_writes_file.svg");
    save(&path, &top_down_svg(&Mesh::<()>::tetrahedron(1.0, None).unwrap())).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(written.contains("<svg"));
}
