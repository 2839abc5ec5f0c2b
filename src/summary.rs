//! Flat geometric summary of a mesh, read straight from the geometry kernel.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::traits::GeometryKernel;
use serde::Serialize;

/// Axis-aligned bounds as plain arrays, `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [Real; 3],
    pub max: [Real; 3],
}

impl BoundingBox {
    pub fn dimensions(&self) -> [Real; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

impl From<Aabb> for BoundingBox {
    fn from(aabb: Aabb) -> Self {
        BoundingBox {
            min: [aabb.mins.x, aabb.mins.y, aabb.mins.z],
            max: [aabb.maxs.x, aabb.maxs.y, aabb.maxs.z],
        }
    }
}

/// Read-only geometric summary of one mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometrySummary {
    pub vertex_count: usize,
    pub face_count: usize,
    pub bounding_box: BoundingBox,
    pub surface_area: Real,
    /// Signed volume, passed through as computed (negative or meaningless for open meshes).
    pub volume: Real,
    pub normal_count: usize,
}

/// Summarize `mesh` from the kernel's own queries; nothing is recomputed here.
///
/// An empty mesh yields zero counts and a degenerate box at the origin.
///
/// ## Errors
/// [`GeometryError::InvalidMesh`] if a face references a missing vertex.
pub fn summarize<K: GeometryKernel + ?Sized>(mesh: &K) -> Result<GeometrySummary, GeometryError> {
    let vertex_count = mesh.vertex_count();
    if let Some(face) = mesh.faces().iter().find(|f| f.iter().any(|&i| i >= vertex_count)) {
        return Err(GeometryError::InvalidMesh(format!(
            "face {face:?} references a vertex outside 0..{vertex_count}"
        )));
    }

    if mesh.is_empty() {
        tracing::warn!(mesh = mesh.name(), "summarizing a mesh without vertices");
    }

    Ok(GeometrySummary {
        vertex_count,
        face_count: mesh.face_count(),
        bounding_box: mesh.bounding_box().into(),
        surface_area: mesh.area(),
        volume: mesh.volume(),
        normal_count: mesh.vertex_normals().len(),
    })
}

/// Summarize the mesh at `index`, treating a missing entry as an invalid mesh.
///
/// ## Errors
/// [`GeometryError::InvalidMesh`] if there is no mesh at `index`, or if that
/// mesh is malformed.
pub fn summarize_nth<K: GeometryKernel>(
    meshes: &[K],
    index: usize,
) -> Result<GeometrySummary, GeometryError> {
    let mesh = meshes.get(index).ok_or_else(|| {
        GeometryError::InvalidMesh(format!("no mesh at index {index} ({} available)", meshes.len()))
    })?;
    summarize(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn cube_summary() {
        let summary = summarize(&Mesh::<()>::cube(2.0, None).unwrap()).unwrap();
        assert_eq!(summary.vertex_count, 8);
        assert_eq!(summary.face_count, 12);
        assert_eq!(summary.normal_count, 8);
        assert_eq!(summary.bounding_box.min, [0.0; 3]);
        assert_eq!(summary.bounding_box.max, [2.0; 3]);
        assert_eq!(summary.bounding_box.dimensions(), [2.0; 3]);
        assert!((summary.surface_area - 24.0).abs() < 1e-9);
        assert!((summary.volume - 8.0).abs() < 1e-9);
    }

    #[test]
    fn empty_mesh_is_reported_not_rejected() {
        let summary = summarize(&Mesh::<()>::empty(None)).unwrap();
        assert_eq!(summary.vertex_count, 0);
        assert_eq!(summary.face_count, 0);
        assert_eq!(summary.normal_count, 0);
        assert_eq!(summary.bounding_box.min, [0.0; 3]);
        assert_eq!(summary.bounding_box.max, [0.0; 3]);
    }

    #[test]
    fn missing_mesh_is_invalid() {
        let meshes = vec![Mesh::<()>::cube(1.0, None).unwrap()];
        assert!(summarize_nth(&meshes, 0).is_ok());
        assert!(matches!(
            summarize_nth(&meshes, 1),
            Err(GeometryError::InvalidMesh(_))
        ));
    }

    #[test]
    fn serializes_to_json() {
        let summary = summarize(&Mesh::<()>::square(1.0, None).unwrap()).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["vertex_count"], 4);
        assert_eq!(json["bounding_box"]["max"][0], 1.0);
    }
}
