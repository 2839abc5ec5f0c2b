//! Top-down (XY) projections of mesh vertices, ready for plotting.

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::traits::GeometryKernel;
use geo::{Coord, Rect};
use hashbrown::HashSet;

/// Margin added around the depth projection, as a fraction of the larger XY extent.
pub const DEPTH_MARGIN_FRACTION: Real = 0.05;

/// Vertices projected onto XY, each paired with its Z as a depth value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPointSet {
    pub points_xy: Vec<Coord<Real>>,
    /// Index-aligned with `points_xy`.
    pub depths_z: Vec<Real>,
    /// Display bounds: the XY bounding box grown by the margin on every side.
    pub bounds: Rect<Real>,
}

impl ProjectedPointSet {
    pub fn len(&self) -> usize {
        self.points_xy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_xy.is_empty()
    }

    /// `(min, max)` of the depth values, `None` when there are no points.
    pub fn depth_range(&self) -> Option<(Real, Real)> {
        self.depths_z.iter().fold(None, |acc, &z| match acc {
            None => Some((z, z)),
            Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
        })
    }
}

/// Vertices and unique edges projected onto XY, for wireframe plots.
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeProjection {
    pub points_xy: Vec<Coord<Real>>,
    /// Index pairs into `points_xy`, each edge once, in first-seen face order.
    pub edges: Vec<[usize; 2]>,
    pub bounds: Rect<Real>,
}

/// XY part of `aabb`, grown on every side by `fraction` of the larger XY range.
pub fn padded_xy_bounds(aabb: &Aabb, fraction: Real) -> Rect<Real> {
    let range = (aabb.maxs.x - aabb.mins.x).max(aabb.maxs.y - aabb.mins.y);
    let margin = fraction * range;
    Rect::new(
        Coord {
            x: aabb.mins.x - margin,
            y: aabb.mins.y - margin,
        },
        Coord {
            x: aabb.maxs.x + margin,
            y: aabb.maxs.y + margin,
        },
    )
}

/// Project every vertex to `(x, y)` with `z` as depth, in native vertex order.
pub fn project_with_depth<K: GeometryKernel + ?Sized>(mesh: &K) -> ProjectedPointSet {
    let vertices = mesh.vertices();
    ProjectedPointSet {
        points_xy: vertices.iter().map(|v| Coord { x: v.x, y: v.y }).collect(),
        depths_z: vertices.iter().map(|v| v.z).collect(),
        bounds: padded_xy_bounds(&mesh.bounding_box(), DEPTH_MARGIN_FRACTION),
    }
}

/// Project the mesh onto XY as points plus the unique edges of its faces.
pub fn project_xy<K: GeometryKernel + ?Sized>(mesh: &K) -> WireframeProjection {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for &[a, b, c] in mesh.faces() {
        for (i, j) in [(a, b), (b, c), (c, a)] {
            let key = if i < j { [i, j] } else { [j, i] };
            if seen.insert(key) {
                edges.push(key);
            }
        }
    }

    WireframeProjection {
        points_xy: mesh.vertices().iter().map(|v| Coord { x: v.x, y: v.y }).collect(),
        edges,
        bounds: padded_xy_bounds(&mesh.bounding_box(), 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn depth_range_of_cube() {
        let projection = project_with_depth(&Mesh::<()>::cuboid(1.0, 1.0, 3.0, None).unwrap());
        assert_eq!(projection.depth_range(), Some((0.0, 3.0)));
    }

    #[test]
    fn wireframe_edges_are_unique() {
        let wire = project_xy(&Mesh::<()>::square(1.0, None).unwrap());
        // four sides plus the shared diagonal
        assert_eq!(wire.edges.len(), 5);
        assert_eq!(wire.edges[0], [0, 1]);
        assert_eq!(wire.bounds.min(), Coord { x: 0.0, y: 0.0 });
    }

    #[test]
    fn empty_mesh_projects_to_nothing() {
        let projection = project_with_depth(&Mesh::<()>::empty(None));
        assert!(projection.is_empty());
        assert_eq!(projection.depth_range(), None);
        assert_eq!(projection.bounds.width(), 0.0);
    }
}
