//! Cylindrical shell: local = (ρ, φ, z) with ρ the axial distance and
//! φ ∈ [0,2π) the azimuth. The local coordinates are the map parameters
//! directly, so the kind stores nothing.

use crate::coords::{from_rows, wrap_two_pi, Coord, Jac, JacDeriv, BOUNDARY_TOL, TWO_PI};
use glam::DVec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CylindricalMeta;

#[inline]
pub fn local_to_global(l: Coord) -> Coord {
    let (rho, phi, z) = (l.x, l.y, l.z);
    let (s, c) = phi.sin_cos();
    DVec3::new(rho * c, rho * s, z)
}

#[inline]
pub fn global_to_local(g: Coord) -> Coord {
    let rho = g.x.hypot(g.y);
    let phi = wrap_two_pi(g.y.atan2(g.x));
    DVec3::new(rho, phi, g.z)
}

/// Intrinsic domain: nonnegative radius, wrapped azimuth. The owning patch's
/// logical box bounds ρ and z.
#[inline]
pub fn is_valid(l: Coord) -> bool {
    l.x >= -BOUNDARY_TOL && l.y >= -BOUNDARY_TOL && l.y <= TWO_PI + BOUNDARY_TOL
}

/// ∂(ρ,φ,z)/∂(x,y,z) at a global point.
pub fn jacobian(g: Coord) -> Jac {
    let (x, y) = (g.x, g.y);
    let rh2 = x * x + y * y;
    let rh_inv = 1.0 / rh2.sqrt();
    let rh_inv2 = 1.0 / rh2;
    from_rows(
        rh_inv * DVec3::new(x, y, 0.0),
        rh_inv2 * DVec3::new(-y, x, 0.0),
        DVec3::Z,
    )
}

/// Second derivatives of (ρ,φ,z) with respect to (x,y,z).
pub fn jacobian_derivative(g: Coord) -> JacDeriv {
    let (x, y) = (g.x, g.y);
    let rh2 = x * x + y * y;
    let rh_inv3 = 1.0 / (rh2 * rh2.sqrt());
    let rh_inv4 = 1.0 / (rh2 * rh2);
    [
        [
            y * y * rh_inv3,
            -x * y * rh_inv3,
            0.0,
            x * x * rh_inv3,
            0.0,
            0.0,
        ],
        [
            2.0 * x * y * rh_inv4,
            (y * y - x * x) * rh_inv4,
            0.0,
            -2.0 * x * y * rh_inv4,
            0.0,
            0.0,
        ],
        [0.0; 6],
    ]
}

/// Same matrix as [`jacobian`], evaluated from a local point.
pub fn jacobian_at_local(l: Coord) -> Jac {
    let (rho, phi) = (l.x, l.y);
    let (s, c) = phi.sin_cos();
    let rho_inv = 1.0 / rho;
    from_rows(
        DVec3::new(c, s, 0.0),
        rho_inv * DVec3::new(-s, c, 0.0),
        DVec3::Z,
    )
}
