// Re-export parry for the active float size
pub use parry3d_f64 as parry3d;

// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used across the crate for plane classification
/// and degenerate-extent checks.
/// Defaults to `1e-6`, but can be overridden:
///  1) **Build-time**: set env var `GLB_INSPECT_TOLERANCE`
///     (e.g. `GLB_INSPECT_TOLERANCE=1e-8 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-6
}

/// Returns the current tolerance.
/// If not set yet, it tries `GLB_INSPECT_TOLERANCE` and falls back to the default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("GLB_INSPECT_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Below this length a plane normal is treated as the zero vector.
pub const EPSILON: Real = 1e-12;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
