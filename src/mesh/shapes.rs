//! Primitive closed and open meshes, handy as fixtures and for quick checks.

use crate::errors::GeometryError;
use crate::float_types::{Real, TAU};
use crate::mesh::Mesh;
use nalgebra::Point3;
use std::fmt::Debug;

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Axis-aligned box spanning `[0, width] x [0, length] x [0, height]`,
    /// wound counter-clockwise seen from outside.
    ///
    /// ```
    /// # use glb_inspect::{mesh::Mesh, traits::GeometryKernel};
    /// let cube = Mesh::<()>::cuboid(2.0, 2.0, 2.0, None).unwrap();
    /// assert_eq!(cube.vertex_count(), 8);
    /// assert_eq!(cube.face_count(), 12);
    /// ```
    ///
    /// ## Errors
    /// [`GeometryError::InvalidMesh`] if a dimension is NaN or infinite. The
    /// other constructors here fail the same way.
    pub fn cuboid(
        width: Real,
        length: Real,
        height: Real,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, GeometryError> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, length, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(width, 0.0, height),
            Point3::new(width, length, height),
            Point3::new(0.0, length, height),
        ];
        let faces = vec![
            [0, 2, 1], [0, 3, 2], // bottom
            [4, 5, 6], [4, 6, 7], // top
            [0, 1, 5], [0, 5, 4], // front
            [3, 7, 6], [3, 6, 2], // back
            [0, 4, 7], [0, 7, 3], // left
            [1, 2, 6], [1, 6, 5], // right
        ];
        Mesh::new(vertices, faces, metadata)
    }

    pub fn cube(width: Real, metadata: Option<S>) -> Result<Mesh<S>, GeometryError> {
        Self::cuboid(width, width, width, metadata)
    }

    /// Right-corner tetrahedron with legs of length `size` along +X, +Y and +Z.
    pub fn tetrahedron(size: Real, metadata: Option<S>) -> Result<Mesh<S>, GeometryError> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(0.0, size, 0.0),
            Point3::new(0.0, 0.0, size),
        ];
        let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        Mesh::new(vertices, faces, metadata)
    }

    /// Closed cylinder around the Z axis from `z = 0` to `z = height`.
    pub fn cylinder(
        radius: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, GeometryError> {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(2 * segments + 2);
        vertices.push(Point3::new(0.0, 0.0, 0.0));
        vertices.push(Point3::new(0.0, 0.0, height));

        let ring = |z: Real| {
            (0..segments).map(move |i| {
                let theta = TAU * i as Real / segments as Real;
                Point3::new(radius * theta.cos(), radius * theta.sin(), z)
            })
        };
        vertices.extend(ring(0.0));
        vertices.extend(ring(height));

        let mut faces = Vec::with_capacity(4 * segments);
        for i in 0..segments {
            let j = (i + 1) % segments;
            let (bi, bj) = (2 + i, 2 + j);
            let (ti, tj) = (2 + segments + i, 2 + segments + j);
            faces.push([0, bj, bi]);
            faces.push([1, ti, tj]);
            faces.push([bi, bj, tj]);
            faces.push([bi, tj, ti]);
        }
        Mesh::new(vertices, faces, metadata)
    }

    /// Flat `size x size` square in the `z = 0` plane, facing +Z.
    pub fn square(size: Real, metadata: Option<S>) -> Result<Mesh<S>, GeometryError> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
        ];
        Mesh::new(vertices, vec![[0, 1, 2], [0, 2, 3]], metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::GeometryKernel;

    #[test]
    fn non_finite_dimensions_are_rejected() {
        let nan = Mesh::<()>::cube(Real::NAN, None);
        assert!(matches!(nan, Err(GeometryError::InvalidMesh(_))));
        let inf = Mesh::<()>::cuboid(1.0, Real::INFINITY, 1.0, None);
        assert!(matches!(inf, Err(GeometryError::InvalidMesh(_))));
        assert!(Mesh::<()>::tetrahedron(Real::NEG_INFINITY, None).is_err());
        assert!(Mesh::<()>::cylinder(Real::NAN, 1.0, 8, None).is_err());
        assert!(Mesh::<()>::cylinder(1.0, Real::INFINITY, 8, None).is_err());
        assert!(Mesh::<()>::square(Real::NAN, None).is_err());
    }

    #[test]
    fn cylinder_has_at_least_three_segments() {
        let cyl = Mesh::<()>::cylinder(1.0, 1.0, 1, None).unwrap();
        assert_eq!(cyl.vertex_count(), 8);
        assert_eq!(cyl.face_count(), 12);
    }
}
