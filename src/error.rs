use glam::{DVec3, UVec3};
use thiserror::Error;

/// Configuration-time failures. All of these are fatal to setup and are
/// reported before any per-point evaluation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("unknown multi-patch system \"{0}\"")]
    UnknownPatchSystem(String),

    #[error("degenerate radial extent: r_min = {r_min}, r_max = {r_max}")]
    DegenerateRadialExtent { r_min: f64, r_max: f64 },

    #[error("cells per dimension must be positive, got {0}")]
    EmptyCells(UVec3),

    #[error("degenerate bounds: xmin = {xmin}, xmax = {xmax}")]
    DegenerateBounds { xmin: DVec3, xmax: DVec3 },

    #[error("cube half-width must be positive, got {0}")]
    DegenerateCubeHalf(f64),

    #[error("multi-patch capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
}

/// Failures of the driver-facing query surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("patch id {id} out of range (have {count} patches)")]
    PatchOutOfRange { id: usize, count: usize },
}
