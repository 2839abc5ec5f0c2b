//! `Mesh` struct: an immutable indexed triangle mesh and its implementation of
//! [`GeometryKernel`].

use crate::errors::GeometryError;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{EPSILON, Real};
use crate::section::Polyline;
use crate::traits::GeometryKernel;
use nalgebra::{Matrix4, Point3, Vector3};
use std::{fmt::Debug, sync::OnceLock};

pub mod plane;
pub mod shapes;
pub mod slice;

use plane::Plane;

#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    vertices: Vec<Point3<Real>>,
    faces: Vec<[usize; 3]>,

    /// Per-vertex normals, either supplied by the source file or derived from faces.
    normals: OnceLock<Vec<Vector3<Real>>>,

    /// Lazily calculated AABB that spans `vertices`.
    bounding_box: OnceLock<Aabb>,

    /// Display name carried by the source file
    name: Option<String>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// A mesh without vertices or faces.
    pub const fn empty(metadata: Option<S>) -> Self {
        Mesh {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: OnceLock::new(),
            bounding_box: OnceLock::new(),
            name: None,
            metadata,
        }
    }

    /// Build a mesh from vertex positions and triangles.
    ///
    /// ## Errors
    /// [`GeometryError::InvalidMesh`] if a coordinate is NaN/infinite or a face
    /// references a vertex that does not exist.
    pub fn new(
        vertices: Vec<Point3<Real>>,
        faces: Vec<[usize; 3]>,
        metadata: Option<S>,
    ) -> Result<Self, GeometryError> {
        if let Some((i, v)) = vertices
            .iter()
            .enumerate()
            .find(|(_, v)| !v.iter().all(|c| c.is_finite()))
        {
            return Err(GeometryError::InvalidMesh(format!(
                "vertex {i} has a NaN or infinite coordinate: {v}"
            )));
        }

        let count = vertices.len();
        if let Some((i, face)) = faces
            .iter()
            .enumerate()
            .find(|(_, f)| f.iter().any(|&idx| idx >= count))
        {
            return Err(GeometryError::InvalidMesh(format!(
                "face {i} ({face:?}) is out of range (vertices.len = {count})"
            )));
        }

        Ok(Mesh {
            vertices,
            faces,
            normals: OnceLock::new(),
            bounding_box: OnceLock::new(),
            name: None,
            metadata,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Use normals supplied alongside the positions instead of deriving them.
    ///
    /// Normals are only adopted when there is exactly one finite normal per vertex;
    /// otherwise they are ignored and derived from the faces on demand.
    pub fn with_vertex_normals(self, normals: Vec<Vector3<Real>>) -> Self {
        let finite = normals.iter().all(|n| n.iter().all(|c| c.is_finite()));
        if normals.len() != self.vertices.len() || !finite {
            tracing::debug!(
                normals = normals.len(),
                vertices = self.vertices.len(),
                "ignoring supplied vertex normals"
            );
            return self;
        }
        Mesh {
            normals: OnceLock::from(normals),
            ..self
        }
    }

    /// Append the geometry of `others` to this mesh, re-indexing their faces.
    /// Vertex normals carry over only when every part already has them.
    pub fn merge<'a, I>(&self, others: I) -> Mesh<S>
    where
        I: IntoIterator<Item = &'a Mesh<S>>,
        S: 'a,
    {
        let mut vertices = self.vertices.clone();
        let mut faces = self.faces.clone();
        let mut normals = if self.vertices.is_empty() {
            Some(Vec::new())
        } else {
            self.normals.get().cloned()
        };

        for other in others {
            let offset = vertices.len();
            vertices.extend_from_slice(&other.vertices);
            faces.extend(other.faces.iter().map(|f| f.map(|i| i + offset)));
            normals = match (normals, other.normals.get()) {
                (Some(mut acc), Some(n)) => {
                    acc.extend_from_slice(n);
                    Some(acc)
                },
                _ => None,
            };
        }

        let mesh = Mesh {
            vertices,
            faces,
            normals: OnceLock::new(),
            bounding_box: OnceLock::new(),
            name: self.name.clone(),
            metadata: self.metadata.clone(),
        };
        match normals {
            Some(n) => mesh.with_vertex_normals(n),
            None => mesh,
        }
    }

    /// Apply an affine 4x4 transform to positions and any known vertex normals.
    ///
    /// Mirroring transforms flip the winding so the signed volume keeps its sign.
    pub fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        let vertices = self.vertices.iter().map(|p| mat.transform_point(p)).collect();

        let mirrored = mat.fixed_view::<3, 3>(0, 0).clone_owned().determinant() < 0.0;
        let faces = if mirrored {
            self.faces.iter().map(|&[a, b, c]| [a, c, b]).collect()
        } else {
            self.faces.clone()
        };

        let mesh = Mesh {
            vertices,
            faces,
            normals: OnceLock::new(),
            bounding_box: OnceLock::new(),
            name: self.name.clone(),
            metadata: self.metadata.clone(),
        };

        // Known normals follow the inverse transpose; otherwise they are derived
        // from the transformed faces on demand.
        match (self.normals.get(), mat.try_inverse()) {
            (Some(normals), Some(inv)) => {
                let inv_t = inv.transpose();
                let normals = normals
                    .iter()
                    .map(|n| {
                        let t = inv_t.transform_vector(n);
                        let len = t.norm();
                        if len > EPSILON { t / len } else { Vector3::zeros() }
                    })
                    .collect();
                mesh.with_vertex_normals(normals)
            },
            _ => mesh,
        }
    }

    /// Area-weighted per-vertex normals.
    fn derive_vertex_normals(&self) -> Vec<Vector3<Real>> {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for &[a, b, c] in &self.faces {
            // |cross| = 2 * area, so the sum is area weighted
            let [pa, pb, pc] = [self.vertices[a], self.vertices[b], self.vertices[c]];
            let n = (pb - pa).cross(&(pc - pa));
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }
        for n in &mut normals {
            let len = n.norm();
            if len > EPSILON {
                *n /= len;
            } else {
                *n = Vector3::zeros();
            }
        }
        normals
    }

    fn triangle(&self, face: &[usize; 3]) -> [Point3<Real>; 3] {
        face.map(|i| self.vertices[i])
    }
}

impl<S: Clone + Send + Sync + Debug> GeometryKernel for Mesh<S> {
    fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    fn vertex_normals(&self) -> &[Vector3<Real>] {
        self.normals.get_or_init(|| self.derive_vertex_normals())
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] spanning all vertices.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);

            for v in &self.vertices {
                mins = mins.inf(v);
                maxs = maxs.sup(v);
            }

            // No vertices: a trivial AABB at origin
            if self.vertices.is_empty() {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(mins, maxs)
        })
    }

    fn area(&self) -> Real {
        self.faces
            .iter()
            .map(|f| {
                let [a, b, c] = self.triangle(f);
                0.5 * (b - a).cross(&(c - a)).norm()
            })
            .sum()
    }

    /// Divergence theorem over origin-based tetrahedra.
    fn volume(&self) -> Real {
        self.faces
            .iter()
            .map(|f| {
                let [a, b, c] = self.triangle(f);
                a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
            })
            .sum()
    }

    fn centroid(&self) -> Point3<Real> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }

        let (weighted, total_area) = self.faces.iter().fold(
            (Vector3::zeros(), 0.0),
            |(acc, total), f| {
                let [a, b, c] = self.triangle(f);
                let area = 0.5 * (b - a).cross(&(c - a)).norm();
                let center = (a.coords + b.coords + c.coords) / 3.0;
                (acc + center * area, total + area)
            },
        );

        if total_area > EPSILON {
            return Point3::from(weighted / total_area);
        }

        // zero-area surface: plain vertex mean
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    fn intersect_plane(&self, plane: &Plane) -> Vec<Polyline> {
        self.slice(plane)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
