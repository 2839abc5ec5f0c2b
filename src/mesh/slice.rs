//! Plane/mesh intersection: per-face segment extraction followed by stitching
//! the segments into polylines.

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::plane::{COPLANAR, FRONT, Plane, SPANNING};
use crate::section::Polyline;
use crate::traits::GeometryKernel;
use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use std::fmt::Debug;

/// Topological identity of a cut point: either an existing vertex lying on the
/// plane, or the crossing point of an edge (smaller vertex index first).
/// Neighbouring faces produce equal keys for the points they share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum CutPoint {
    Vertex(usize),
    Edge(usize, usize),
}

impl CutPoint {
    fn edge(a: usize, b: usize) -> Self {
        if a < b { CutPoint::Edge(a, b) } else { CutPoint::Edge(b, a) }
    }
}

/// Segments collected from one plane cut, deduplicated and in discovery order.
#[derive(Debug, Default)]
struct SegmentSoup {
    positions: HashMap<CutPoint, Point3<Real>>,
    segments: Vec<[CutPoint; 2]>,
    seen: HashSet<[CutPoint; 2]>,
}

impl SegmentSoup {
    fn push(&mut self, a: CutPoint, b: CutPoint) {
        if a == b {
            return;
        }
        let key = if a < b { [a, b] } else { [b, a] };
        if self.seen.insert(key) {
            self.segments.push([a, b]);
        }
    }

    /// Chain segments into polylines: open chains first (started from their
    /// odd-degree ends, in segment order), then the remaining closed loops.
    fn stitch(self) -> Vec<Polyline> {
        let mut adjacency: HashMap<CutPoint, Vec<usize>> = HashMap::new();
        for (i, [a, b]) in self.segments.iter().enumerate() {
            adjacency.entry(*a).or_default().push(i);
            adjacency.entry(*b).or_default().push(i);
        }
        let degree = |p: &CutPoint| adjacency.get(p).map_or(0, Vec::len);

        let mut used = vec![false; self.segments.len()];
        let mut chains = Vec::new();

        for i in 0..self.segments.len() {
            if used[i] {
                continue;
            }
            let [a, b] = self.segments[i];
            let start = if degree(&a) % 2 == 1 {
                a
            } else if degree(&b) % 2 == 1 {
                b
            } else {
                continue;
            };
            chains.push(self.walk(start, &adjacency, &mut used));
        }

        for i in 0..self.segments.len() {
            if !used[i] {
                let start = self.segments[i][0];
                chains.push(self.walk(start, &adjacency, &mut used));
            }
        }

        chains
            .into_iter()
            .filter(|chain| chain.len() >= 2)
            .map(|chain| {
                let closed = chain.len() > 2 && chain.first() == chain.last();
                let vertices = chain
                    .iter()
                    .filter_map(|p| self.positions.get(p).copied())
                    .collect();
                Polyline::new(vertices, closed)
            })
            .collect()
    }

    fn walk(
        &self,
        start: CutPoint,
        adjacency: &HashMap<CutPoint, Vec<usize>>,
        used: &mut [bool],
    ) -> Vec<CutPoint> {
        let mut chain = vec![start];
        let mut current = start;

        while let Some(next_segment) = adjacency
            .get(&current)
            .and_then(|segs| segs.iter().copied().find(|&s| !used[s]))
        {
            used[next_segment] = true;
            let [a, b] = self.segments[next_segment];
            let next = if a == current { b } else { a };
            chain.push(next);
            if next == start {
                break;
            }
            current = next;
        }

        chain
    }
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Slice this mesh by `plane`, returning the cut as polylines.
    ///
    /// Vertices within [`Plane::tolerance_for`] the mesh bounds count as lying
    /// on the plane. Faces are visited in native order, so the output is stable
    /// for a given mesh and plane. Faces lying in the plane are left out; an
    /// edge lying in the plane is reported once, from the face whose third
    /// vertex is in front.
    ///
    /// ```
    /// # use glb_inspect::mesh::{Mesh, plane::Plane};
    /// let cube = Mesh::<()>::cube(2.0, None).unwrap();
    /// let loops = cube.slice(&Plane::horizontal(1.0));
    /// assert_eq!(loops.len(), 1);
    /// assert!(loops[0].is_closed());
    /// ```
    pub fn slice(&self, plane: &Plane) -> Vec<Polyline> {
        if self.faces().is_empty() || self.misses_bounds(plane) {
            return Vec::new();
        }

        let eps = plane.tolerance_for(&self.bounding_box());
        let vertices = self.vertices();
        let distances: Vec<Real> = vertices.iter().map(|v| plane.signed_distance(v)).collect();
        let sides: Vec<i8> = distances
            .iter()
            .map(|&d| Plane::classify_distance(d, eps))
            .collect();

        let mut soup = SegmentSoup::default();

        for face in self.faces() {
            let on_plane: Vec<usize> = face
                .iter()
                .copied()
                .filter(|&i| sides[i] == COPLANAR)
                .collect();

            match on_plane.len() {
                3 => continue,
                2 => {
                    let third = face.iter().copied().find(|i| !on_plane.contains(i));
                    if third.is_some_and(|i| sides[i] == FRONT) {
                        soup.push(CutPoint::Vertex(on_plane[0]), CutPoint::Vertex(on_plane[1]));
                        for &i in &on_plane {
                            soup.positions.insert(CutPoint::Vertex(i), vertices[i]);
                        }
                    }
                },
                _ => {
                    let mut hits: Vec<CutPoint> = Vec::with_capacity(2);
                    for k in 0..3 {
                        let (i, j) = (face[k], face[(k + 1) % 3]);
                        let hit = if sides[i] == COPLANAR {
                            soup.positions.insert(CutPoint::Vertex(i), vertices[i]);
                            CutPoint::Vertex(i)
                        } else if sides[i] | sides[j] == SPANNING {
                            let key = CutPoint::edge(i, j);
                            // interpolate from the lower index so both faces agree bit-for-bit
                            let (lo, hi) = (i.min(j), i.max(j));
                            soup.positions.entry(key).or_insert_with(|| {
                                let t = distances[lo] / (distances[lo] - distances[hi]);
                                vertices[lo] + (vertices[hi] - vertices[lo]) * t
                            });
                            key
                        } else {
                            continue;
                        };
                        if !hits.contains(&hit) {
                            hits.push(hit);
                        }
                    }
                    if let &[a, b] = hits.as_slice() {
                        soup.push(a, b);
                    }
                },
            }
        }

        soup.stitch()
    }

    /// True when every corner of the bounding box lies strictly on one side.
    fn misses_bounds(&self, plane: &Plane) -> bool {
        let bb = self.bounding_box();
        let (lo, hi) = (bb.mins, bb.maxs);
        let corners = [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ];
        let eps = plane.tolerance_for(&bb);
        let side = |c: &Point3<Real>| Plane::classify_distance(plane.signed_distance(c), eps);
        let first = side(&corners[0]);
        first != COPLANAR && corners.iter().all(|c| side(c) == first)
    }
}
