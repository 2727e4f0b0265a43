//! Query surface consumed by the external grid driver: topology metadata
//! and the vectorized point search, all reading the active registry.

use crate::coords::{Coord, Index};
use crate::error::QueryError;
use crate::registry::active;
use glam::DVec3;

/// Static description of one patch, as the driver consumes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchSpec {
    pub is_cartesian: bool,
    pub ncells: Index,
    pub xmin: Coord,
    pub xmax: Coord,
}

/// Number of patches in the active configuration.
pub fn patch_count() -> usize {
    active().size()
}

pub fn patch_spec(id: usize) -> Result<PatchSpec, QueryError> {
    let mp = active();
    let patch = mp.get_patch(id).ok_or(QueryError::PatchOutOfRange {
        id,
        count: mp.size(),
    })?;
    Ok(PatchSpec {
        is_cartesian: patch.is_cartesian(),
        ncells: patch.ncells,
        xmin: patch.xmin,
        xmax: patch.xmax,
    })
}

/// Per-face interpatch flags, ordered lo_x, hi_x, lo_y, hi_y, lo_z, hi_z;
/// `true` marks a ghost-exchanged interface, `false` an outer boundary.
pub fn boundary_spec(id: usize) -> Result<[bool; 6], QueryError> {
    let mp = active();
    let patch = mp.get_patch(id).ok_or(QueryError::PatchOutOfRange {
        id,
        count: mp.size(),
    })?;
    let mut flags = [false; 6];
    for d in 0..3 {
        flags[2 * d] = !patch.faces[0][d].is_outer_boundary;
        flags[2 * d + 1] = !patch.faces[1][d].is_outer_boundary;
    }
    Ok(flags)
}

/// Vectorized `global_to_local`: per-point semantics identical to the
/// scalar search, unclaimed points get `NO_PATCH` and NaN locals. All
/// slices must share a length. The registry guard is taken once for the
/// whole batch.
pub fn global_to_local_batch(
    gx: &[f64],
    gy: &[f64],
    gz: &[f64],
    patch_ids: &mut [usize],
    lx: &mut [f64],
    ly: &mut [f64],
    lz: &mut [f64],
) {
    let n = gx.len();
    assert!(
        gy.len() == n
            && gz.len() == n
            && patch_ids.len() == n
            && lx.len() == n
            && ly.len() == n
            && lz.len() == n,
        "batch slices must share a length"
    );
    let mp = active();
    for i in 0..n {
        let (l, id) = mp.global_to_local(DVec3::new(gx[i], gy[i], gz[i]));
        patch_ids[i] = id;
        lx[i] = l.x;
        ly[i] = l.y;
        lz[i] = l.z;
    }
}
