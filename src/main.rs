//! glb-inspect: summaries, cross-sections and depth plots of glTF/GLB meshes.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=glb_inspect=info` - loading and scan progress
//! - `RUST_LOG=glb_inspect=debug` - per-primitive and per-slice detail
//!
//! # Example
//!
//! ```bash
//! glb-inspect model.glb              # summaries, metadata and depth plot
//! PATH_TO_GLB=model.glb glb-inspect slice --slices 50
//! ```

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use glb_inspect::config::{Config, DEFAULT_OUT_DIR, DEFAULT_SLICES};
use glb_inspect::io::gltf::{GltfMesh, Scene, load_scene, read_metadata};
use glb_inspect::io::svg::{self, SCAN_MARGIN_FRACTION};
use glb_inspect::projection::{padded_xy_bounds, project_with_depth};
use glb_inspect::section::{scan_z, section_at_centroid};
use glb_inspect::GeometryKernel;
use glb_inspect::summary::summarize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod report;

use report::{InfoReport, MeshReport, ScanReport};

/// glb-inspect - inspect the triangle meshes of a glTF/GLB file.
#[derive(Parser)]
#[command(name = "glb-inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input .glb/.gltf file (defaults to $PATH_TO_GLB)
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory for SVG plots
    #[arg(long, global = true, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Index of the mesh to plot and slice
    #[arg(long, global = true, default_value_t = 0)]
    mesh: usize,

    /// Plot and slice the whole scene, with node transforms applied
    #[arg(long, global = true)]
    flatten: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Clone, Copy, Subcommand)]
enum Commands {
    /// Summaries, scene metadata and the depth plot (default)
    Report,
    /// Summaries and scene metadata only
    Info,
    /// Wireframe plot seen from above
    TopDown,
    /// Vertices seen from above, colored by Z
    Depth,
    /// Cut at the centroid height, then scan horizontal cuts across the Z range
    Slice {
        /// Number of interior cut heights
        #[arg(long, default_value_t = DEFAULT_SLICES)]
        slices: usize,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "glb_inspect=info",
            2 => "glb_inspect=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        if !cli.quiet {
            eprintln!("{}: {}", "Error".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {}", "Caused by".yellow(), cause);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Report);
    let mut config = Config::resolve(cli.path.clone())?
        .with_out_dir(cli.out_dir.clone())
        .with_mesh_index(cli.mesh)
        .with_flatten(cli.flatten);
    if let Commands::Slice { slices } = command {
        config = config.with_slices(slices);
    }

    let scene = load_scene(&config.source)
        .with_context(|| format!("Failed to load mesh from {}", config.source.display()))?;

    match command {
        Commands::Report => {
            info_command(cli, &config, &scene)?;
            depth_command(cli, &config, &scene)
        },
        Commands::Info => info_command(cli, &config, &scene),
        Commands::TopDown => {
            let mesh = target_mesh(&config, &scene)?;
            write_plot(cli, &config, "top_down", &svg::top_down_svg(&*mesh))
        },
        Commands::Depth => depth_command(cli, &config, &scene),
        Commands::Slice { .. } => slice_command(cli, &config, &scene),
    }
}

/// The mesh selected by `--mesh`, or the whole scene with `--flatten`.
fn target_mesh<'a>(config: &Config, scene: &'a Scene) -> Result<Cow<'a, GltfMesh>> {
    if config.flatten {
        return Ok(Cow::Owned(scene.flatten()));
    }
    let mesh = scene
        .mesh(config.mesh_index)
        .with_context(|| format!("Cannot select a mesh from {}", config.source.display()))?;
    Ok(Cow::Borrowed(mesh))
}

fn info_command(cli: &Cli, config: &Config, scene: &Scene) -> Result<()> {
    let meshes = scene
        .meshes
        .iter()
        .enumerate()
        .map(|(index, mesh)| {
            let summary =
                summarize(mesh).with_context(|| format!("Failed to summarize mesh {index}"))?;
            Ok(MeshReport {
                index,
                name: mesh.name().map(str::to_owned),
                summary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let metadata = read_metadata(&config.source)
        .with_context(|| format!("Failed to read metadata from {}", config.source.display()))?;

    let report = InfoReport {
        path: config.source.display().to_string(),
        meshes,
        metadata,
    };
    report::print_info(&report, cli.format, cli.quiet)
}

fn depth_command(cli: &Cli, config: &Config, scene: &Scene) -> Result<()> {
    let mesh = target_mesh(config, scene)?;
    let projection = project_with_depth(&*mesh);
    let title = format!("Depth (Z) seen from above: {}", mesh.name().unwrap_or("unnamed"));
    write_plot(cli, config, "depth", &svg::depth_svg(&projection, &title))
}

fn slice_command(cli: &Cli, config: &Config, scene: &Scene) -> Result<()> {
    let target = target_mesh(config, scene)?;
    let mesh: &GltfMesh = &target;

    let centroid = mesh.centroid();
    let section = section_at_centroid(mesh).context("Failed to cut at the centroid")?;
    let scan = scan_z(mesh, config.slices).context("Failed to scan along Z")?;
    info!(found = scan.found().count(), slices = scan.len(), "slicing finished");

    let report = ScanReport::new(&config.source, centroid.z, &section, &scan);
    report::print_scan(&report, cli.format, cli.quiet)?;

    let bounds = mesh.bounding_box();
    if !section.is_empty() {
        let doc = svg::section_svg(&section, &padded_xy_bounds(&bounds, SCAN_MARGIN_FRACTION));
        write_plot(cli, config, "section", &doc)?;
    }
    if scan.any_found() {
        write_plot(cli, config, "scan", &svg::scan_svg(&scan, &bounds))?;
    }
    Ok(())
}

fn write_plot(cli: &Cli, config: &Config, suffix: &str, document: &svg::Document) -> Result<()> {
    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("Failed to create {}", config.out_dir.display()))?;
    let path = config.plot_path(suffix);
    svg::save(&path, document).with_context(|| format!("Failed to write {}", path.display()))?;
    report::print_written(suffix, &path, cli.format, cli.quiet);
    Ok(())
}
