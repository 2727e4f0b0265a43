//! Cubed-sphere wedge: one of six shell patches covering a spherical shell,
//! each a gnomonic projection from a cube face. Local = (ξ, η, ρ) with
//! ξ, η ∈ [−1,1] the face angles and ρ ∈ [0,1] the normalized radius.

use crate::coords::{from_rows, sym_index, Coord, Jac, JacDeriv, BOUNDARY_TOL};
use crate::tables::{
    WEDGE_AXIS_SIGN, WEDGE_DENOM_AXIS, WEDGE_ETA_AXIS, WEDGE_ETA_SIGN, WEDGE_PERM, WEDGE_SIGN,
    WEDGE_XI_AXIS, WEDGE_XI_SIGN,
};
use glam::DVec3;

/// The six cube faces, in table row order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Radial extent of one wedge; `inv_dr` caches `1/(r_outer - r_inner)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WedgeMeta {
    pub face: CubeFace,
    pub r_inner: f64,
    pub r_outer: f64,
    pub inv_dr: f64,
}

impl WedgeMeta {
    pub fn new(face: CubeFace, r_inner: f64, r_outer: f64) -> Self {
        assert!(
            r_outer > r_inner,
            "wedge requires r_outer > r_inner, got {r_inner} .. {r_outer}"
        );
        Self {
            face,
            r_inner,
            r_outer,
            inv_dr: 1.0 / (r_outer - r_inner),
        }
    }
}

#[inline]
pub fn local_to_global(l: Coord, m: &WedgeMeta) -> Coord {
    let (xi, eta, rho) = (l.x, l.y, l.z);
    let r = m.r_inner + rho * (m.r_outer - m.r_inner);
    let r_div_d = r / (1.0 + xi * xi + eta * eta).sqrt();
    let comp = [r_div_d, xi * r_div_d, eta * r_div_d];
    let f = m.face.index();
    DVec3::new(
        WEDGE_SIGN[f][0] * comp[WEDGE_PERM[f][0]],
        WEDGE_SIGN[f][1] * comp[WEDGE_PERM[f][1]],
        WEDGE_SIGN[f][2] * comp[WEDGE_PERM[f][2]],
    )
}

#[inline]
pub fn global_to_local(g: Coord, m: &WedgeMeta) -> Coord {
    let f = m.face.index();
    let ga = [g.x, g.y, g.z];
    let w = ga[WEDGE_DENOM_AXIS[f]];
    let xi = WEDGE_XI_SIGN[f] * ga[WEDGE_XI_AXIS[f]] / w;
    let eta = WEDGE_ETA_SIGN[f] * ga[WEDGE_ETA_AXIS[f]] / w;
    // Inside the wedge the face-axis component carries the face's sign;
    // folding the radius by that sign sends opposite-hemisphere points to
    // ρ < 0, which `is_valid` rejects.
    let r = g.length().copysign(w * WEDGE_AXIS_SIGN[f]);
    let rho = (r - m.r_inner) * m.inv_dr;
    DVec3::new(xi, eta, rho)
}

#[inline]
pub fn is_valid(l: Coord) -> bool {
    l.x >= -1.0 - BOUNDARY_TOL
        && l.x <= 1.0 + BOUNDARY_TOL
        && l.y >= -1.0 - BOUNDARY_TOL
        && l.y <= 1.0 + BOUNDARY_TOL
        && l.z >= -BOUNDARY_TOL
        && l.z <= 1.0 + BOUNDARY_TOL
}

/// ∂(ξ,η,ρ)/∂(x,y,z) at a global point.
pub fn jacobian(g: Coord, m: &WedgeMeta) -> Jac {
    let f = m.face.index();
    let ga = [g.x, g.y, g.z];
    let iw = WEDGE_DENOM_AXIS[f];
    let ixi = WEDGE_XI_AXIS[f];
    let ieta = WEDGE_ETA_AXIS[f];
    let w_inv = 1.0 / ga[iw];
    let w_inv2 = w_inv * w_inv;

    let mut d_xi = DVec3::ZERO;
    d_xi[ixi] = WEDGE_XI_SIGN[f] * w_inv;
    d_xi[iw] = -WEDGE_XI_SIGN[f] * ga[ixi] * w_inv2;

    let mut d_eta = DVec3::ZERO;
    d_eta[ieta] = WEDGE_ETA_SIGN[f] * w_inv;
    d_eta[iw] = -WEDGE_ETA_SIGN[f] * ga[ieta] * w_inv2;

    let d_rho = (m.inv_dr / g.length()) * g;
    from_rows(d_xi, d_eta, d_rho)
}

/// Second derivatives of (ξ,η,ρ) with respect to (x,y,z).
pub fn jacobian_derivative(g: Coord, m: &WedgeMeta) -> JacDeriv {
    let f = m.face.index();
    let ga = [g.x, g.y, g.z];
    let iw = WEDGE_DENOM_AXIS[f];
    let ixi = WEDGE_XI_AXIS[f];
    let ieta = WEDGE_ETA_AXIS[f];
    let w_inv = 1.0 / ga[iw];
    let w_inv2 = w_inv * w_inv;
    let w_inv3 = w_inv2 * w_inv;

    let mut d_xi = [0.0; 6];
    d_xi[sym_index(ixi, iw)] = -WEDGE_XI_SIGN[f] * w_inv2;
    d_xi[sym_index(iw, iw)] = 2.0 * WEDGE_XI_SIGN[f] * ga[ixi] * w_inv3;

    let mut d_eta = [0.0; 6];
    d_eta[sym_index(ieta, iw)] = -WEDGE_ETA_SIGN[f] * w_inv2;
    d_eta[sym_index(iw, iw)] = 2.0 * WEDGE_ETA_SIGN[f] * ga[ieta] * w_inv3;

    let r2 = g.length_squared();
    let s = m.inv_dr / (r2 * r2.sqrt());
    let d_rho = [
        s * (r2 - g.x * g.x),
        -s * g.x * g.y,
        -s * g.x * g.z,
        s * (r2 - g.y * g.y),
        -s * g.y * g.z,
        s * (r2 - g.z * g.z),
    ];
    [d_xi, d_eta, d_rho]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn meta(face: CubeFace) -> WedgeMeta {
        WedgeMeta::new(face, 1.0, 2.0)
    }

    #[test]
    fn outer_shell_straight_up_spot_value() {
        let g = local_to_global(DVec3::new(0.0, 0.0, 1.0), &meta(CubeFace::PosZ));
        assert_relative_eq!(g.x, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(g.y, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(g.z, 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn round_trip_every_face() {
        for face in CubeFace::ALL {
            let m = meta(face);
            for &xi in &[-1.0, -0.5, 0.0, 0.7, 1.0] {
                for &eta in &[-1.0, -0.3, 0.0, 0.6, 1.0] {
                    for &rho in &[0.0, 0.5, 1.0] {
                        let l = DVec3::new(xi, eta, rho);
                        let l2 = global_to_local(local_to_global(l, &m), &m);
                        assert_relative_eq!(l2.x, l.x, epsilon = 1.0e-10);
                        assert_relative_eq!(l2.y, l.y, epsilon = 1.0e-10);
                        assert_relative_eq!(l2.z, l.z, epsilon = 1.0e-10);
                        assert!(is_valid(l2), "{face:?} {l} -> {l2}");
                    }
                }
            }
        }
    }

    #[test]
    fn shell_radii_are_reproduced() {
        for face in CubeFace::ALL {
            let m = meta(face);
            for &xi in &[-1.0, 0.2, 1.0] {
                for &eta in &[-0.9, 0.0, 1.0] {
                    let outer = local_to_global(DVec3::new(xi, eta, 1.0), &m).length();
                    let inner = local_to_global(DVec3::new(xi, eta, 0.0), &m).length();
                    assert_relative_eq!(outer, m.r_outer, epsilon = 1.0e-12);
                    assert_relative_eq!(inner, m.r_inner, epsilon = 1.0e-12);
                }
            }
        }
    }

    #[test]
    fn opposite_hemisphere_is_rejected() {
        // (-2, 0, 0) sits in the -x wedge; the +x wedge's quotients alone
        // would put it at (ξ,η) = (0,0), so the radius fold must reject it.
        let m = meta(CubeFace::PosX);
        let l = global_to_local(DVec3::new(-2.0, 0.0, 0.0), &m);
        assert!(!is_valid(l));
        assert!(is_valid(global_to_local(
            DVec3::new(-2.0, 0.0, 0.0),
            &meta(CubeFace::NegX)
        )));
    }

    #[test]
    fn perpendicular_points_are_rejected() {
        // Straight up +z lies on no x-face wedge; the quotient denominator
        // vanishes there.
        let l = global_to_local(DVec3::new(0.0, 0.0, 1.5), &meta(CubeFace::PosX));
        assert!(!is_valid(l));
    }

    #[test]
    fn validity_respects_boundary_tolerance() {
        assert!(is_valid(DVec3::new(1.0, -1.0, 0.0)));
        assert!(is_valid(DVec3::new(1.0 + 0.5e-12, 0.0, 0.5)));
        assert!(!is_valid(DVec3::new(1.0 + 1.0e-9, 0.0, 0.5)));
        assert!(!is_valid(DVec3::new(0.0, 0.0, -1.0e-9)));
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let h = 1.0e-6;
        for face in CubeFace::ALL {
            let m = meta(face);
            let g = local_to_global(DVec3::new(0.3, -0.4, 0.6), &m);
            let jac = jacobian(g, &m);
            for i in 0..3 {
                let mut gp = g;
                let mut gm = g;
                gp[i] += h;
                gm[i] -= h;
                let fd = (global_to_local(gp, &m) - global_to_local(gm, &m)) / (2.0 * h);
                for a in 0..3 {
                    assert_relative_eq!(
                        jac.row(a)[i],
                        fd[a],
                        epsilon = 1.0e-7,
                        max_relative = 1.0e-6
                    );
                }
            }
        }
    }

    #[test]
    fn jacobian_derivative_matches_finite_differences() {
        let h = 1.0e-6;
        for face in CubeFace::ALL {
            let m = meta(face);
            let g = local_to_global(DVec3::new(-0.2, 0.5, 0.4), &m);
            let djac = jacobian_derivative(g, &m);
            for j in 0..3 {
                let mut gp = g;
                let mut gm = g;
                gp[j] += h;
                gm[j] -= h;
                let fd = (jacobian(gp, &m) - jacobian(gm, &m)) * (1.0 / (2.0 * h));
                for a in 0..3 {
                    for i in 0..3 {
                        assert_relative_eq!(
                            djac[a][sym_index(i, j)],
                            fd.row(a)[i],
                            epsilon = 1.0e-6,
                            max_relative = 1.0e-5
                        );
                    }
                }
            }
        }
    }
}
