//! SVG plots of projections and cross-sections.
//!
//! All plots look down the Z axis. SVG's Y axis points down, so every Y
//! coordinate is negated and the view box is flipped to match.

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::projection::{ProjectedPointSet, padded_xy_bounds, project_xy};
use crate::section::{CrossSection, Polyline, SliceScan};
use crate::traits::GeometryKernel;
use geo::Rect;
use std::path::Path;

pub use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path as SvgPath, Rectangle};

/// Margin around the scan plot, as a fraction of the larger XY extent.
pub const SCAN_MARGIN_FRACTION: Real = 0.10;

const COLOR_BAR_STEPS: usize = 32;

/// Matplotlib's viridis, sampled at quarter steps.
const VIRIDIS: [(Real, [u8; 3]); 5] = [
    (0.00, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.50, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.00, [253, 231, 37]),
];

/// Hex color for `t` in `[0, 1]` (clamped) on the viridis ramp.
pub fn viridis(t: Real) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let upper = VIRIDIS.iter().position(|(stop, _)| *stop >= t).unwrap_or(VIRIDIS.len() - 1).max(1);
    let (t0, c0) = VIRIDIS[upper - 1];
    let (t1, c1) = VIRIDIS[upper];
    let f = (t - t0) / (t1 - t0);
    let mix = |a: u8, b: u8| (Real::from(a) + (Real::from(b) - Real::from(a)) * f).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(c0[0], c1[0]),
        mix(c0[1], c1[1]),
        mix(c0[2], c1[2])
    )
}

/// Plot frame: the document view box and a stroke width proportional to it.
struct Frame {
    rect: Rect<Real>,
    extent: Real,
}

impl Frame {
    fn new(rect: Rect<Real>) -> Self {
        let extent = rect.width().max(rect.height());
        // a point or a line still needs a visible area
        let extent = if extent > 0.0 { extent } else { 1.0 };
        Self { rect, extent }
    }

    fn stroke(&self) -> Real {
        self.extent * 0.002
    }

    fn document(&self, extra_width: Real) -> Document {
        let min = self.rect.min();
        let min_side = self.extent * 1e-3;
        let (w, h) = (self.rect.width().max(min_side), self.rect.height().max(min_side));
        Document::new()
            .set("viewBox", (min.x, -(min.y + h), w + extra_width, h))
            .set("preserveAspectRatio", "xMidYMid meet")
            .add(
                Rectangle::new()
                    .set("x", min.x)
                    .set("y", -(min.y + h))
                    .set("width", w + extra_width)
                    .set("height", h)
                    .set("fill", "white"),
            )
    }
}

fn polyline_data(polyline: &Polyline) -> Option<Data> {
    let (first, rest) = polyline.vertices().split_first()?;
    let data = rest
        .iter()
        .fold(Data::new().move_to((first.x, -first.y)), |d, p| d.line_to((p.x, -p.y)));
    Some(if polyline.is_closed() { data.close() } else { data })
}

fn section_group(section: &CrossSection, color: &str, stroke: Real) -> Group {
    section
        .polylines
        .iter()
        .filter_map(polyline_data)
        .fold(Group::new(), |group, data| {
            group.add(
                SvgPath::new()
                    .set("d", data)
                    .set("fill", "none")
                    .set("stroke", color)
                    .set("stroke-width", stroke),
            )
        })
}

/// Wireframe of every face edge plus a dot per vertex.
pub fn top_down_svg<K: GeometryKernel + ?Sized>(mesh: &K) -> Document {
    let wireframe = project_xy(mesh);
    let frame = Frame::new(wireframe.bounds);
    let stroke = frame.stroke();

    let mut data = Data::new();
    for &[a, b] in &wireframe.edges {
        let (p, q) = (wireframe.points_xy[a], wireframe.points_xy[b]);
        data = data.move_to((p.x, -p.y)).line_to((q.x, -q.y));
    }

    let edges = SvgPath::new()
        .set("d", data)
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", stroke);
    let vertices = wireframe.points_xy.iter().fold(Group::new().set("fill", "red"), |g, p| {
        g.add(Circle::new().set("cx", p.x).set("cy", -p.y).set("r", stroke * 1.5))
    });

    frame.document(0.0).add(edges).add(vertices)
}

/// Scatter of the projected vertices, colored by depth, with a color bar on the right.
pub fn depth_svg(projection: &ProjectedPointSet, title: &str) -> Document {
    let frame = Frame::new(projection.bounds);
    let stroke = frame.stroke();
    let bar_width = frame.extent * 0.05;
    let gap = frame.extent * 0.03;

    let (lo, hi) = projection.depth_range().unwrap_or((0.0, 0.0));
    let span = hi - lo;
    let normalize = |z: Real| if span > 0.0 { (z - lo) / span } else { 0.5 };

    let points = projection
        .points_xy
        .iter()
        .zip(&projection.depths_z)
        .fold(Group::new(), |g, (p, &z)| {
            g.add(
                Circle::new()
                    .set("cx", p.x)
                    .set("cy", -p.y)
                    .set("r", stroke * 2.0)
                    .set("fill", viridis(normalize(z))),
            )
        });

    let min = frame.rect.min();
    let height = frame.rect.height().max(frame.extent * 1e-3);
    let step = height / COLOR_BAR_STEPS as Real;
    let bar_x = min.x + frame.rect.width() + gap;
    let bar = (0..COLOR_BAR_STEPS).fold(Group::new().set("class", "color-bar"), |g, i| {
        // low depths at the bottom
        let t = (i as Real + 0.5) / COLOR_BAR_STEPS as Real;
        g.add(
            Rectangle::new()
                .set("x", bar_x)
                .set("y", -(min.y + step * (i as Real + 1.0)))
                .set("width", bar_width)
                .set("height", step)
                .set("fill", viridis(t))
                .set("data-depth", lo + span * t),
        )
    });

    frame
        .document(gap + bar_width)
        .set("aria-label", title)
        .set("data-depth-min", lo)
        .set("data-depth-max", hi)
        .add(points)
        .add(bar)
}

/// A single cross-section drawn inside `bounds`.
pub fn section_svg(section: &CrossSection, bounds: &Rect<Real>) -> Document {
    let frame = Frame::new(*bounds);
    let stroke = frame.stroke();
    frame.document(0.0).add(section_group(section, "blue", stroke))
}

/// Every non-empty slice of a scan overlaid, colored by height, with a 10%
/// margin around the mesh's XY bounds.
pub fn scan_svg(scan: &SliceScan, mesh_bounds: &Aabb) -> Document {
    let frame = Frame::new(padded_xy_bounds(mesh_bounds, SCAN_MARGIN_FRACTION));
    let stroke = frame.stroke();
    let (lo, hi) = (mesh_bounds.mins.z, mesh_bounds.maxs.z);
    let span = hi - lo;

    scan.found().fold(frame.document(0.0), |doc, slice| {
        let t = if span > 0.0 { (slice.height - lo) / span } else { 0.5 };
        doc.add(section_group(&slice.section, &viridis(t), stroke).set("data-height", slice.height))
    })
}

/// Write `document` to `path`.
pub fn save<P: AsRef<Path>>(path: P, document: &Document) -> std::io::Result<()> {
    svg::save(path, document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), "#440154");
        assert_eq!(viridis(1.0), "#fde725");
        assert_eq!(viridis(-3.0), "#440154");
        assert_eq!(viridis(7.0), "#fde725");
        assert_eq!(viridis(Real::NAN), "#440154");
        assert_eq!(viridis(0.5), "#21918c");
    }

    #[test]
    fn flat_frame_keeps_positive_extent() {
        let frame = Frame::new(Rect::new((1.0, 1.0), (1.0, 1.0)));
        assert!(frame.stroke() > 0.0);
    }
}
