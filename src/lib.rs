//! Inspection of triangle meshes stored as **glTF 2.0 / GLB**: geometric
//! summaries, planar cross-sections and top-down depth projections.
//!
//! # Features
//! #### Optional
//! - **parallel**: use rayon to cut the planes of a Z scan concurrently
//!
//! # Example
//! ```
//! use glb_inspect::{mesh::Mesh, section::scan_z, summary::summarize};
//!
//! let cube = Mesh::<()>::cube(2.0, None).unwrap();
//! let summary = summarize(&cube).unwrap();
//! assert_eq!(summary.face_count, 12);
//!
//! let scan = scan_z(&cube, 3).unwrap();
//! assert_eq!(scan.found().count(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod projection;
pub mod section;
pub mod summary;
pub mod traits;

pub use errors::GeometryError;
pub use mesh::Mesh;
pub use mesh::plane::Plane;
pub use traits::GeometryKernel;
