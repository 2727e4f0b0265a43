use glam::{DMat3, DVec3, UVec3};

pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Absolute tolerance for membership tests at logical-domain boundaries,
/// absorbing floating-point noise from the inverse maps.
pub const BOUNDARY_TOL: f64 = 1.0e-12;

/// Sentinel patch id: no patch claims the queried point.
pub const NO_PATCH: usize = usize::MAX;

/// Coordinate triple. Whether it is local (patch-logical) or global
/// (Cartesian) is carried by context, never by the type.
pub type Coord = DVec3;

/// Cells per logical dimension.
pub type Index = UVec3;

/// First derivatives of the global→local map: element (row `a`, column `i`)
/// is ∂local_a/∂global_i.
pub type Jac = DMat3;

/// Second derivatives of the global→local map: one row per local
/// coordinate, six entries per row ordered xx, xy, xz, yy, yz, zz.
pub type JacDeriv = [[f64; 6]; 3];

/// Classification of one patch face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceInfo {
    /// True if the face touches the outer boundary of the composite domain,
    /// false if it borders another patch (ghost exchange).
    pub is_outer_boundary: bool,
}

pub const OUTER_FACE: FaceInfo = FaceInfo {
    is_outer_boundary: true,
};
pub const INNER_FACE: FaceInfo = FaceInfo {
    is_outer_boundary: false,
};

impl Default for FaceInfo {
    fn default() -> Self {
        OUTER_FACE
    }
}

/// Per-patch face table: `[low faces, high faces]`, three entries each.
pub type PatchFaces = [[FaceInfo; 3]; 2];

pub const ALL_OUTER: PatchFaces = [[OUTER_FACE; 3]; 2];
pub const ALL_INNER: PatchFaces = [[INNER_FACE; 3]; 2];

/// Builds a matrix from gradient rows (glam matrices are column-major).
#[inline]
pub(crate) fn from_rows(r0: DVec3, r1: DVec3, r2: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(r0.x, r1.x, r2.x),
        DVec3::new(r0.y, r1.y, r2.y),
        DVec3::new(r0.z, r1.z, r2.z),
    )
}

/// Shifts an `atan2` result into [0, 2π).
#[inline]
pub(crate) fn wrap_two_pi(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + TWO_PI
    } else {
        angle
    }
}

/// Position of the (i, j) second derivative in the xx, xy, xz, yy, yz, zz
/// row layout; symmetric in its arguments.
#[inline]
pub(crate) const fn sym_index(i: usize, j: usize) -> usize {
    const MAP: [[usize; 3]; 3] = [[0, 1, 2], [1, 3, 4], [2, 4, 5]];
    MAP[i][j]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_builder_round_trips_through_glam() {
        let m = from_rows(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(4.0, 5.0, 6.0),
            DVec3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(m.row(0), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.row(1), DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.row(2), DVec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn angle_wrap_covers_atan2_range() {
        assert_eq!(wrap_two_pi(0.0), 0.0);
        assert!(wrap_two_pi(-1.0e-9) > TWO_PI - 1.0e-8);
        assert_eq!(wrap_two_pi(std::f64::consts::PI), std::f64::consts::PI);
    }

    #[test]
    fn symmetric_index_is_symmetric() {
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(sym_index(i, j), sym_index(j, i));
            }
        }
        assert_eq!(sym_index(0, 0), 0);
        assert_eq!(sym_index(2, 2), 5);
    }
}
