use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::mesh::plane::Plane;
use crate::section::Polyline;
use nalgebra::{Point3, Vector3};

/// The geometry capabilities the summary, section and projection code relies on.
///
/// [`Mesh`](crate::mesh::Mesh) is the in-crate implementation; anything else
/// (a bound native kernel, a proxy over another mesh library) can be swapped
/// in by implementing this trait.
pub trait GeometryKernel {
    /// Vertex positions in native order.
    fn vertices(&self) -> &[Point3<Real>];

    /// Triangles as indices into [`vertices`](Self::vertices).
    fn faces(&self) -> &[[usize; 3]];

    /// One normal per vertex (may be zero for isolated vertices).
    fn vertex_normals(&self) -> &[Vector3<Real>];

    /// Axis-aligned bounds; a degenerate box at the origin for an empty mesh.
    fn bounding_box(&self) -> Aabb;

    /// Total surface area.
    fn area(&self) -> Real;

    /// Signed enclosed volume. Not meaningful for open meshes, and never clamped.
    fn volume(&self) -> Real;

    /// Area-weighted centroid of the surface.
    fn centroid(&self) -> Point3<Real>;

    /// Intersection of the surface with `plane`, as connected polylines in a
    /// stable, input-determined order. Empty when the plane misses the mesh.
    fn intersect_plane(&self, plane: &Plane) -> Vec<Polyline>;

    /// Display name, if the source format carries one.
    fn name(&self) -> Option<&str> {
        None
    }

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    fn face_count(&self) -> usize {
        self.faces().len()
    }

    fn is_empty(&self) -> bool {
        self.vertices().is_empty()
    }
}
