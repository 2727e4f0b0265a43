//! Fixed orientation tables for the six cubed-sphere wedges.
//!
//! Row order follows the `CubeFace` discriminants: +x, -x, +y, -y, +z, -z.
//! Indexing these tables replaces a six-way branch, so all accelerator lanes
//! execute the same instructions regardless of which wedge they sit in.

/// Forward routing of the projected components `comp = (r/d, ξ·r/d, η·r/d)`:
/// global axis `k` receives `WEDGE_SIGN[face][k] * comp[WEDGE_PERM[face][k]]`.
pub const WEDGE_PERM: [[usize; 3]; 6] = [
    // +x
    [0, 1, 2],
    // -x
    [0, 1, 2],
    // +y
    [1, 0, 2],
    // -y
    [1, 0, 2],
    // +z
    [1, 2, 0],
    // -z
    [1, 2, 0],
];

pub const WEDGE_SIGN: [[f64; 3]; 6] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
];

/// Inverse quotient selection: `ξ = WEDGE_XI_SIGN · g[WEDGE_XI_AXIS] / w`
/// and `η = WEDGE_ETA_SIGN · g[WEDGE_ETA_AXIS] / w`, with
/// `w = g[WEDGE_DENOM_AXIS]`. The signs invert the forward routing above
/// exactly, face by face.
pub const WEDGE_DENOM_AXIS: [usize; 6] = [0, 0, 1, 1, 2, 2];
pub const WEDGE_XI_AXIS: [usize; 6] = [1, 1, 0, 0, 0, 0];
pub const WEDGE_XI_SIGN: [f64; 6] = [1.0, 1.0, -1.0, -1.0, 1.0, -1.0];
pub const WEDGE_ETA_AXIS: [usize; 6] = [2, 2, 2, 2, 1, 1];
pub const WEDGE_ETA_SIGN: [f64; 6] = [1.0, -1.0, 1.0, -1.0, 1.0, 1.0];

/// Sign of the face-axis global component everywhere inside the wedge.
pub const WEDGE_AXIS_SIGN: [f64; 6] = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
