//! Planar cross-sections: a single cut through a mesh, and a scan of evenly
//! spaced horizontal cuts between the mesh's Z bounds.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::traits::GeometryKernel;
use geo::{Area, BoundingRect, LineString, MultiLineString, Polygon as GeoPolygon, Rect};
use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One connected piece of a cross-section, in the order the cut discovered it.
///
/// Closed loops repeat their first vertex at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<Point3<Real>>,
    closed: bool,
}

impl Polyline {
    pub const fn new(vertices: Vec<Point3<Real>>, closed: bool) -> Self {
        Polyline { vertices, closed }
    }

    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Length along the polyline, in 3D.
    pub fn length(&self) -> Real {
        self.vertices.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// The polyline projected onto the XY axes, for display.
    pub fn to_xy(&self) -> LineString<Real> {
        self.vertices.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into()
    }
}

/// Result of intersecting a mesh with a plane.
///
/// An empty section is a successful result meaning "the plane misses the mesh".
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    pub plane: Plane,
    pub polylines: Vec<Polyline>,
}

impl CrossSection {
    pub const fn empty(plane: Plane) -> Self {
        CrossSection {
            plane,
            polylines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn total_length(&self) -> Real {
        self.polylines.iter().map(Polyline::length).sum()
    }

    pub fn to_xy(&self) -> MultiLineString<Real> {
        MultiLineString::new(self.polylines.iter().map(Polyline::to_xy).collect())
    }

    /// Sum of the XY areas enclosed by each closed loop (holes are not subtracted).
    pub fn enclosed_area(&self) -> Real {
        self.polylines
            .iter()
            .filter(|p| p.is_closed())
            .map(|p| GeoPolygon::new(p.to_xy(), vec![]).unsigned_area())
            .sum()
    }

    /// XY bounding rectangle of all polylines, `None` when empty.
    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        self.to_xy().bounding_rect()
    }
}

/// A cut at one scan height.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub height: Real,
    pub section: CrossSection,
}

/// Ordered horizontal cuts produced by [`scan_z`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliceScan {
    pub slices: Vec<Slice>,
    /// Set when the mesh has no Z extent, so no height could be cut.
    pub degenerate: bool,
}

impl SliceScan {
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn heights(&self) -> impl Iterator<Item = Real> + '_ {
        self.slices.iter().map(|s| s.height)
    }

    /// Slices whose section intersected the mesh.
    pub fn found(&self) -> impl Iterator<Item = &Slice> + '_ {
        self.slices.iter().filter(|s| !s.section.is_empty())
    }

    pub fn any_found(&self) -> bool {
        self.found().next().is_some()
    }
}

/// Intersect `mesh` with the plane through `plane_origin` with `plane_normal`.
///
/// The normal need not be unit length.
///
/// ## Errors
/// [`GeometryError::InvalidPlane`] for NaN/infinite inputs or a zero normal.
///
/// ## Example
/// ```
/// # use glb_inspect::{mesh::Mesh, section::section};
/// # use nalgebra::{Point3, Vector3};
/// let cube = Mesh::<()>::cube(2.0, None).unwrap();
/// let cut = section(&cube, Point3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, 3.0)).unwrap();
/// assert_eq!(cut.len(), 1);
/// assert!((cut.total_length() - 8.0).abs() < 1e-9);
/// ```
pub fn section<K: GeometryKernel + ?Sized>(
    mesh: &K,
    plane_origin: Point3<Real>,
    plane_normal: Vector3<Real>,
) -> Result<CrossSection, GeometryError> {
    let plane = Plane::from_origin_normal(plane_origin, plane_normal)?;
    let polylines = mesh.intersect_plane(&plane);
    debug!(
        origin = ?plane_origin,
        polylines = polylines.len(),
        "computed cross-section"
    );
    Ok(CrossSection { plane, polylines })
}

/// Horizontal cut through the mesh's centroid.
pub fn section_at_centroid<K: GeometryKernel + ?Sized>(
    mesh: &K,
) -> Result<CrossSection, GeometryError> {
    section(mesh, mesh.centroid(), Vector3::z())
}

/// The `num_slices` interior points of an evenly spaced `num_slices + 2`
/// point grid over `[min, max]` (both ends dropped).
pub fn interior_heights(min: Real, max: Real, num_slices: usize) -> Vec<Real> {
    let step = (max - min) / (num_slices as Real + 1.0);
    (1..=num_slices).map(|i| min + step * i as Real).collect()
}

/// Cut `mesh` with `num_slices` horizontal planes strictly between its Z bounds.
///
/// Every plane passes through the centroid's X,Y. One entry is returned per
/// requested height, in increasing order, whether or not it hit anything.
/// A mesh whose Z extent is within rounding of zero returns `num_slices`
/// empty entries at its single height and sets [`SliceScan::degenerate`].
///
/// ## Errors
/// [`GeometryError::InvalidArgument`] if `num_slices` is zero.
pub fn scan_z<K: GeometryKernel + Sync + ?Sized>(
    mesh: &K,
    num_slices: usize,
) -> Result<SliceScan, GeometryError> {
    if num_slices < 1 {
        return Err(GeometryError::InvalidArgument(format!(
            "num_slices must be at least 1, got {num_slices}"
        )));
    }

    let bb = mesh.bounding_box();
    let (min_z, max_z) = (bb.mins.z, bb.maxs.z);

    if max_z - min_z <= Plane::horizontal(min_z).tolerance_for(&bb) {
        info!(min_z, max_z, num_slices, "mesh has no Z extent, nothing to slice");
        let slices = (0..num_slices)
            .map(|_| Slice {
                height: min_z,
                section: CrossSection::empty(Plane::horizontal(min_z)),
            })
            .collect();
        return Ok(SliceScan {
            slices,
            degenerate: true,
        });
    }

    let centroid = mesh.centroid();
    let heights = interior_heights(min_z, max_z, num_slices);
    let slices = section_heights(mesh, centroid, &heights)?;

    let scan = SliceScan {
        slices,
        degenerate: false,
    };
    info!(
        num_slices,
        found = scan.found().count(),
        min_z,
        max_z,
        "finished Z scan"
    );
    Ok(scan)
}

#[cfg(not(feature = "parallel"))]
fn section_heights<K: GeometryKernel + Sync + ?Sized>(
    mesh: &K,
    centroid: Point3<Real>,
    heights: &[Real],
) -> Result<Vec<Slice>, GeometryError> {
    heights
        .iter()
        .map(|&height| {
            let origin = Point3::new(centroid.x, centroid.y, height);
            section(mesh, origin, Vector3::z()).map(|section| Slice { height, section })
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn section_heights<K: GeometryKernel + Sync + ?Sized>(
    mesh: &K,
    centroid: Point3<Real>,
    heights: &[Real],
) -> Result<Vec<Slice>, GeometryError> {
    heights
        .par_iter()
        .map(|&height| {
            let origin = Point3::new(centroid.x, centroid.y, height);
            section(mesh, origin, Vector3::z()).map(|section| Slice { height, section })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn interior_heights_drop_both_ends() {
        let h = interior_heights(0.0, 4.0, 3);
        assert_eq!(h, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn polyline_xy_drops_z() {
        let p = Polyline::new(
            vec![Point3::new(0.0, 0.0, 5.0), Point3::new(3.0, 4.0, 5.0)],
            false,
        );
        assert_eq!(p.length(), 5.0);
        let ls = p.to_xy();
        assert_eq!(ls.0.len(), 2);
        assert_eq!(ls.0[1].x, 3.0);
        assert_eq!(ls.0[1].y, 4.0);
    }

    #[test]
    fn cube_section_area_and_bounds() {
        let cube = Mesh::<()>::cuboid(2.0, 3.0, 1.0, None).unwrap();
        let cut = section_at_centroid(&cube).unwrap();
        assert_eq!(cut.len(), 1);
        assert!((cut.enclosed_area() - 6.0).abs() < 1e-9);
        let rect = cut.bounding_rect().unwrap();
        assert!((rect.width() - 2.0).abs() < 1e-9);
        assert!((rect.height() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_section_has_no_bounds() {
        let cut = CrossSection::empty(Plane::horizontal(0.0));
        assert!(cut.is_empty());
        assert_eq!(cut.bounding_rect(), None);
        assert_eq!(cut.enclosed_area(), 0.0);
    }
}
