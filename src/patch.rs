//! One logical coordinate block: a geometry, its grid extent, and the
//! face-boundary classification, behind a closed tagged dispatch.

use crate::cartesian::{self, CartesianMeta};
use crate::coords::{Coord, Index, Jac, JacDeriv, PatchFaces, ALL_OUTER, BOUNDARY_TOL};
use crate::cubed_sphere::{self, WedgeMeta};
use crate::cylindrical::{self, CylindricalMeta};
use crate::spherical::{self, SphericalMeta};
use glam::{DVec3, UVec3};

/// Geometry of one patch. Exactly one variant is active, fixed at
/// construction; every operation dispatches with a total `match`, so adding
/// a kind without handling it everywhere is a compile error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PatchKind {
    Cartesian(CartesianMeta),
    Spherical(SphericalMeta),
    Wedge(WedgeMeta),
    Cylindrical(CylindricalMeta),
}

/// A patch is a plain value: constructed once at setup, immutable and
/// `Copy` afterwards so it can be handed to accelerator-side code
/// byte-for-byte.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patch {
    pub kind: PatchKind,
    /// Cells per logical dimension.
    pub ncells: Index,
    /// Logical (local-coordinate) lower bounds.
    pub xmin: Coord,
    /// Logical upper bounds.
    pub xmax: Coord,
    /// Cached spacing `(xmax - xmin) / ncells`.
    pub dx: Coord,
    /// Caller-supplied boundary classification, `[low, high]` per dimension.
    pub faces: PatchFaces,
}

impl Patch {
    /// Trivial unit-box Cartesian patch, the default registry content.
    pub const DEFAULT: Patch = Patch {
        kind: PatchKind::Cartesian(CartesianMeta),
        ncells: UVec3::ONE,
        xmin: DVec3::ZERO,
        xmax: DVec3::ONE,
        dx: DVec3::ONE,
        faces: ALL_OUTER,
    };

    pub fn new(kind: PatchKind, ncells: Index, xmin: Coord, xmax: Coord, faces: PatchFaces) -> Self {
        assert!(
            ncells.cmpgt(UVec3::ZERO).all(),
            "ncells must be positive, got {ncells}"
        );
        assert!(
            xmax.cmpgt(xmin).all(),
            "xmax must exceed xmin, got {xmin} .. {xmax}"
        );
        let dx = (xmax - xmin) / ncells.as_dvec3();
        Self {
            kind,
            ncells,
            xmin,
            xmax,
            dx,
            faces,
        }
    }

    #[inline]
    pub fn is_cartesian(&self) -> bool {
        matches!(self.kind, PatchKind::Cartesian(_))
    }

    #[inline]
    pub fn local_to_global(&self, l: Coord) -> Coord {
        match &self.kind {
            PatchKind::Cartesian(_) => cartesian::local_to_global(l),
            PatchKind::Spherical(m) => spherical::local_to_global(l, m),
            PatchKind::Wedge(m) => cubed_sphere::local_to_global(l, m),
            PatchKind::Cylindrical(_) => cylindrical::local_to_global(l),
        }
    }

    #[inline]
    pub fn global_to_local(&self, g: Coord) -> Coord {
        match &self.kind {
            PatchKind::Cartesian(_) => cartesian::global_to_local(g),
            PatchKind::Spherical(m) => spherical::global_to_local(g, m),
            PatchKind::Wedge(m) => cubed_sphere::global_to_local(g, m),
            PatchKind::Cylindrical(_) => cylindrical::global_to_local(g),
        }
    }

    /// Membership: the kind's intrinsic domain and this patch's logical box,
    /// both with the boundary tolerance. NaN components fail both clauses.
    #[inline]
    pub fn is_valid_local(&self, l: Coord) -> bool {
        let intrinsic = match &self.kind {
            PatchKind::Cartesian(_) => cartesian::is_valid(l),
            PatchKind::Spherical(_) => spherical::is_valid(l),
            PatchKind::Wedge(_) => cubed_sphere::is_valid(l),
            PatchKind::Cylindrical(_) => cylindrical::is_valid(l),
        };
        intrinsic
            && l.cmpge(self.xmin - BOUNDARY_TOL).all()
            && l.cmple(self.xmax + BOUNDARY_TOL).all()
    }

    /// First derivatives of the global→local map at a global point.
    #[inline]
    pub fn jacobian(&self, g: Coord) -> Jac {
        match &self.kind {
            PatchKind::Cartesian(_) => cartesian::jacobian(g),
            PatchKind::Spherical(m) => spherical::jacobian(g, m),
            PatchKind::Wedge(m) => cubed_sphere::jacobian(g, m),
            PatchKind::Cylindrical(_) => cylindrical::jacobian(g),
        }
    }

    /// Second derivatives of the global→local map at a global point.
    #[inline]
    pub fn jacobian_derivative(&self, g: Coord) -> JacDeriv {
        match &self.kind {
            PatchKind::Cartesian(_) => cartesian::jacobian_derivative(g),
            PatchKind::Spherical(m) => spherical::jacobian_derivative(g, m),
            PatchKind::Wedge(m) => cubed_sphere::jacobian_derivative(g, m),
            PatchKind::Cylindrical(_) => cylindrical::jacobian_derivative(g),
        }
    }
}
