//! Identity geometry: local and global coordinates coincide.

use crate::coords::{Coord, Jac, JacDeriv};
use glam::DMat3;

/// Cartesian blocks carry no mapping parameters; the owning patch supplies
/// the bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CartesianMeta;

#[inline]
pub fn local_to_global(l: Coord) -> Coord {
    l
}

#[inline]
pub fn global_to_local(g: Coord) -> Coord {
    g
}

/// The identity map has no intrinsic domain of its own; membership is the
/// owning patch's logical box.
#[inline]
pub fn is_valid(_l: Coord) -> bool {
    true
}

#[inline]
pub fn jacobian(_g: Coord) -> Jac {
    DMat3::IDENTITY
}

#[inline]
pub fn jacobian_derivative(_g: Coord) -> JacDeriv {
    [[0.0; 6]; 3]
}
