//! Console output for the `glb-inspect` binary: colored text or JSON.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use glb_inspect::float_types::Real;
use glb_inspect::io::gltf::SceneMetadata;
use glb_inspect::section::{CrossSection, SliceScan};
use glb_inspect::summary::GeometrySummary;
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
pub struct MeshReport {
    pub index: usize,
    pub name: Option<String>,
    #[serde(flatten)]
    pub summary: GeometrySummary,
}

#[derive(Serialize)]
pub struct InfoReport {
    pub path: String,
    pub meshes: Vec<MeshReport>,
    pub metadata: SceneMetadata,
}

#[derive(Serialize)]
pub struct SectionReport {
    pub height: Real,
    pub paths: usize,
    pub length: Real,
    pub enclosed_area: Real,
}

impl SectionReport {
    pub fn new(height: Real, section: &CrossSection) -> Self {
        Self {
            height,
            paths: section.len(),
            length: section.total_length(),
            enclosed_area: section.enclosed_area(),
        }
    }
}

#[derive(Serialize)]
pub struct ScanReport {
    pub path: String,
    pub centroid_section: SectionReport,
    pub slices_requested: usize,
    pub degenerate: bool,
    /// Non-empty slices only.
    pub found: Vec<SectionReport>,
}

impl ScanReport {
    pub fn new(
        path: &Path,
        centroid_height: Real,
        centroid: &CrossSection,
        scan: &SliceScan,
    ) -> Self {
        Self {
            path: path.display().to_string(),
            centroid_section: SectionReport::new(centroid_height, centroid),
            slices_requested: scan.len(),
            degenerate: scan.degenerate,
            found: scan
                .found()
                .map(|slice| SectionReport::new(slice.height, &slice.section))
                .collect(),
        }
    }
}

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T, quiet: bool) -> Result<()> {
    if !quiet {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn print_bounds(summary: &GeometrySummary) {
    let bb = &summary.bounding_box;
    let dims = bb.dimensions();
    println!(
        "    {}: [{:.4}, {:.4}, {:.4}] - [{:.4}, {:.4}, {:.4}]",
        "Bounds".cyan(),
        bb.min[0],
        bb.min[1],
        bb.min[2],
        bb.max[0],
        bb.max[1],
        bb.max[2]
    );
    println!(
        "    {}: {:.4} x {:.4} x {:.4}",
        "Dimensions".cyan(),
        dims[0],
        dims[1],
        dims[2]
    );
}

pub fn print_info(report: &InfoReport, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report, quiet),
        OutputFormat::Text => {
            if quiet {
                return Ok(());
            }
            println!("{}", "Mesh Information".bold().underline());
            println!("  {}: {}", "File".cyan(), report.path);

            for mesh in &report.meshes {
                let s = &mesh.summary;
                println!(
                    "\n  {} {} ({})",
                    "Geometry".bold(),
                    mesh.index,
                    mesh.name.as_deref().unwrap_or("unnamed")
                );
                println!("    {}: {}", "Vertices".cyan(), s.vertex_count);
                println!("    {}: {}", "Faces".cyan(), s.face_count);
                println!("    {}: {:.6}", "Volume".cyan(), s.volume);
                println!("    {}: {:.6}", "Surface area".cyan(), s.surface_area);
                print_bounds(s);
                println!("    {}: {}", "Vertex normals".cyan(), s.normal_count);
            }

            let meta = &report.metadata;
            println!("\n{}", "Scene Metadata".bold().underline());
            println!(
                "  {}: {} ({})",
                "glTF version".cyan(),
                meta.version,
                meta.generator.as_deref().unwrap_or("unknown generator")
            );
            println!(
                "  {}: {} scenes, {} nodes, {} meshes, {} materials",
                "Contents".cyan(),
                meta.scene_count,
                meta.node_count,
                meta.mesh_count,
                meta.material_count
            );
            match &meta.default_scene {
                Some(scene) => {
                    println!("  {}: {}", "Default scene".cyan(), scene.index);
                    println!(
                        "  {}: {}",
                        "Scene name".cyan(),
                        scene.name.as_deref().unwrap_or("unnamed")
                    );
                    println!("  {}: {:?}", "Root nodes".cyan(), scene.nodes);
                },
                None => println!("  {}", "No default scene defined.".yellow()),
            }
            Ok(())
        },
    }
}

pub fn print_scan(report: &ScanReport, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report, quiet),
        OutputFormat::Text => {
            if quiet {
                return Ok(());
            }
            println!("{}", "Planar Sections".bold().underline());
            println!("  {}: {}", "File".cyan(), report.path);

            let c = &report.centroid_section;
            if c.paths > 0 {
                println!(
                    "  {}: Z={:.4}, {} paths, length {:.4}, area {:.4}",
                    "Centroid cut".cyan(),
                    c.height,
                    c.paths,
                    c.length,
                    c.enclosed_area
                );
            } else {
                println!("  {}", "Centroid plane does not intersect the mesh.".yellow());
            }

            if report.degenerate {
                println!("  {}", "Mesh has no Z extent; nothing to scan.".yellow());
            }
            for slice in &report.found {
                println!("  Section found at Z={:.4}. Total paths: {}", slice.height, slice.paths);
            }
            if report.found.is_empty() {
                println!(
                    "  {}",
                    format!("No section found in {} slices.", report.slices_requested).yellow()
                );
            } else {
                println!(
                    "  {}: {} of {}",
                    "Slices with sections".cyan(),
                    report.found.len(),
                    report.slices_requested
                );
            }
            Ok(())
        },
    }
}

/// Note a written file; JSON mode stays machine-readable so this is text only.
pub fn print_written(what: &str, path: &Path, format: OutputFormat, quiet: bool) {
    if matches!(format, OutputFormat::Text) && !quiet {
        println!("{} {}: {}", "Wrote".green(), what, path.display());
    }
}
