//! Geometry errors raised by the summary, section and projection operations.
//!
//! Loader and metadata failures live in [`crate::io`] and are surfaced as-is.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Everything that can go wrong inside the geometry core.
///
/// "No intersection" and "empty mesh" are *not* errors: they are reported as
/// empty results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (InvalidMesh) The mesh is absent or its data is malformed
    #[error("(InvalidMesh) {0}")]
    InvalidMesh(String),
    /// (InvalidPlane) The plane origin or normal is NaN/infinite, or the normal is zero
    #[error("(InvalidPlane) Plane through {origin} with normal {normal} is degenerate")]
    InvalidPlane {
        origin: Point3<Real>,
        normal: Vector3<Real>,
    },
    /// (InvalidArgument) A scalar argument is out of range
    #[error("(InvalidArgument) {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_error_kind() {
        let err = GeometryError::InvalidArgument("num_slices must be at least 1, got 0".into());
        assert_eq!(
            err.to_string(),
            "(InvalidArgument) num_slices must be at least 1, got 0"
        );

        let err = GeometryError::InvalidPlane {
            origin: Point3::origin(),
            normal: Vector3::zeros(),
        };
        assert!(err.to_string().starts_with("(InvalidPlane)"));
    }
}
