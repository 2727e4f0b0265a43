//! Spherical shell: local = (ρ, θ, φ) with ρ ∈ [0,1] the normalized radius,
//! θ ∈ [0,2π) the azimuth and φ ∈ [0,π] the polar angle.

use crate::coords::{from_rows, wrap_two_pi, Coord, Jac, JacDeriv, BOUNDARY_TOL, TWO_PI};
use glam::DVec3;
use std::f64::consts::PI;

/// Shell extent. `inv_dr` caches `1/(r_max - r_min)` so the per-point paths
/// never divide by the extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalMeta {
    pub r_min: f64,
    pub r_max: f64,
    pub inv_dr: f64,
}

impl SphericalMeta {
    pub fn new(r_min: f64, r_max: f64) -> Self {
        assert!(
            r_max > r_min,
            "spherical shell requires r_max > r_min, got {r_min} .. {r_max}"
        );
        Self {
            r_min,
            r_max,
            inv_dr: 1.0 / (r_max - r_min),
        }
    }
}

#[inline]
pub fn local_to_global(l: Coord, m: &SphericalMeta) -> Coord {
    let (rho, theta, phi) = (l.x, l.y, l.z);
    let r = m.r_min + rho * (m.r_max - m.r_min);
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    DVec3::new(r * sp * ct, r * sp * st, r * cp)
}

#[inline]
pub fn global_to_local(g: Coord, m: &SphericalMeta) -> Coord {
    let r = g.length();
    let rho = (r - m.r_min) * m.inv_dr;
    let theta = wrap_two_pi(g.y.atan2(g.x));
    // The clamp guards acos against rounding overshoot at the poles.
    let phi = (g.z / r).clamp(-1.0, 1.0).acos();
    DVec3::new(rho, theta, phi)
}

#[inline]
pub fn is_valid(l: Coord) -> bool {
    l.x >= -BOUNDARY_TOL
        && l.x <= 1.0 + BOUNDARY_TOL
        && l.y >= -BOUNDARY_TOL
        && l.y <= TWO_PI + BOUNDARY_TOL
        && l.z >= -BOUNDARY_TOL
        && l.z <= PI + BOUNDARY_TOL
}

/// ∂(ρ,θ,φ)/∂(x,y,z) at a global point.
pub fn jacobian(g: Coord, m: &SphericalMeta) -> Jac {
    let (x, y, z) = (g.x, g.y, g.z);
    let r2 = x * x + y * y + z * z;
    let rh2 = x * x + y * y;
    let r = r2.sqrt();
    let rh = rh2.sqrt();
    let r_inv = 1.0 / r;
    let r_inv2 = 1.0 / r2;
    let rh_inv = 1.0 / rh;
    let rh_inv2 = 1.0 / rh2;

    let d_rho = m.inv_dr * r_inv * DVec3::new(x, y, z);
    let d_theta = rh_inv2 * DVec3::new(-y, x, 0.0);
    let d_phi = DVec3::new(
        x * z * rh_inv * r_inv2,
        y * z * rh_inv * r_inv2,
        -rh * r_inv2,
    );
    from_rows(d_rho, d_theta, d_phi)
}

/// Second derivatives of (ρ,θ,φ) with respect to (x,y,z), rows ordered as
/// the local coordinates, entries xx, xy, xz, yy, yz, zz.
pub fn jacobian_derivative(g: Coord, m: &SphericalMeta) -> JacDeriv {
    let (x, y, z) = (g.x, g.y, g.z);
    let r2 = x * x + y * y + z * z;
    let rh2 = x * x + y * y;
    let r = r2.sqrt();
    let rh = rh2.sqrt();
    let r_inv3 = 1.0 / (r2 * r);
    let r_inv4 = 1.0 / (r2 * r2);
    let rh_inv = 1.0 / rh;
    let rh_inv3 = 1.0 / (rh2 * rh);
    let rh_inv4 = 1.0 / (rh2 * rh2);

    let d_rho = [
        m.inv_dr * (r2 - x * x) * r_inv3,
        -m.inv_dr * x * y * r_inv3,
        -m.inv_dr * x * z * r_inv3,
        m.inv_dr * (r2 - y * y) * r_inv3,
        -m.inv_dr * y * z * r_inv3,
        m.inv_dr * (r2 - z * z) * r_inv3,
    ];
    let d_theta = [
        2.0 * x * y * rh_inv4,
        (y * y - x * x) * rh_inv4,
        0.0,
        -2.0 * x * y * rh_inv4,
        0.0,
        0.0,
    ];
    let d_phi = [
        z * (y * y * r2 - 2.0 * x * x * rh2) * rh_inv3 * r_inv4,
        -x * y * z * (3.0 * rh2 + z * z) * rh_inv3 * r_inv4,
        x * (rh2 - z * z) * rh_inv * r_inv4,
        z * (x * x * r2 - 2.0 * y * y * rh2) * rh_inv3 * r_inv4,
        y * (rh2 - z * z) * rh_inv * r_inv4,
        2.0 * rh * z * r_inv4,
    ];
    [d_rho, d_theta, d_phi]
}

/// Same matrix as [`jacobian`], evaluated from a local point. Handy when the
/// caller already sits on the patch's logical grid and has no Cartesian
/// coordinates in hand.
pub fn jacobian_at_local(l: Coord, m: &SphericalMeta) -> Jac {
    let (rho, theta, phi) = (l.x, l.y, l.z);
    let r = m.r_min + rho * (m.r_max - m.r_min);
    let r_inv = 1.0 / r;
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    let sp_inv = 1.0 / sp;
    from_rows(
        m.inv_dr * DVec3::new(sp * ct, sp * st, cp),
        r_inv * sp_inv * DVec3::new(-st, ct, 0.0),
        r_inv * DVec3::new(cp * ct, cp * st, -sp),
    )
}
