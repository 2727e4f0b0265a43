//! Fixed-capacity patch collection and the factories for the named
//! topologies.

use crate::cartesian::CartesianMeta;
use crate::coords::{Coord, Index, PatchFaces, ALL_INNER, ALL_OUTER, NO_PATCH, OUTER_FACE, TWO_PI};
use crate::cubed_sphere::{CubeFace, WedgeMeta};
use crate::error::SetupError;
use crate::patch::{Patch, PatchKind};
use crate::spherical::SphericalMeta;
use glam::{DVec3, UVec3};
use log::{debug, warn};
use std::f64::consts::PI;

/// Default capacity: enough for the 7-patch cubed sphere with headroom.
pub const MAX_PATCHES: usize = 8;

/// A fixed array of patches plus a count; no allocation, `Copy`, so a
/// configured container can live in accelerator-visible memory. Patch ids
/// are array indices in insertion order and are never reused or reordered.
#[derive(Clone, Copy, Debug)]
pub struct MultiPatch<const N: usize = MAX_PATCHES> {
    patches: [Patch; N],
    count: usize,
}

impl<const N: usize> Default for MultiPatch<N> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<const N: usize> MultiPatch<N> {
    pub const EMPTY: Self = Self {
        patches: [Patch::DEFAULT; N],
        count: 0,
    };

    /// Trivial configuration: one unit-box Cartesian block.
    pub const SINGLE_CARTESIAN: Self = Self {
        patches: [Patch::DEFAULT; N],
        count: 1,
    };

    pub fn new() -> Self {
        Self::EMPTY
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Appends a patch and returns its id. Returns the capacity `N` as a
    /// sentinel when full, leaving the container unchanged; factory callers
    /// must treat that as fatal.
    pub fn add_patch(&mut self, p: Patch) -> usize {
        if self.count < N {
            self.patches[self.count] = p;
            self.count += 1;
            self.count - 1
        } else {
            N
        }
    }

    #[inline]
    pub fn get_patch(&self, id: usize) -> Option<&Patch> {
        (id < self.count).then(|| &self.patches[id])
    }

    /// Forward map on the identified patch. An out-of-range id yields the
    /// NaN triple sentinel.
    #[inline]
    pub fn local_to_global(&self, id: usize, l: Coord) -> Coord {
        match self.get_patch(id) {
            Some(p) => p.local_to_global(l),
            None => DVec3::NAN,
        }
    }

    /// Finds the patch containing a global point: linear scan in insertion
    /// order, first valid inverse wins. Insertion order is the tie-breaker
    /// for points on shared boundaries and is part of the contract. Returns
    /// `(NaN, NO_PATCH)` for points outside every patch.
    #[inline]
    pub fn global_to_local(&self, g: Coord) -> (Coord, usize) {
        for (id, p) in self.patches[..self.count].iter().enumerate() {
            let l = p.global_to_local(g);
            if p.is_valid_local(l) {
                return (l, id);
            }
        }
        (DVec3::NAN, NO_PATCH)
    }

    /// Single Cartesian block; every face is an outer boundary.
    pub fn select_cartesian(
        &mut self,
        ncells: Index,
        xmin: Coord,
        xmax: Coord,
    ) -> Result<(), SetupError> {
        check_cells(ncells)?;
        if !xmax.cmpgt(xmin).all() {
            return Err(SetupError::DegenerateBounds { xmin, xmax });
        }
        self.clear();
        self.must_add(Patch::new(
            PatchKind::Cartesian(CartesianMeta),
            ncells,
            xmin,
            xmax,
            ALL_OUTER,
        ))?;
        debug!("selected Cartesian topology: 1 patch");
        Ok(())
    }

    /// Single spherical shell; logical box (0,0,0)–(1,2π,π), all faces
    /// outer boundaries.
    pub fn select_spherical(
        &mut self,
        ncells: Index,
        r_min: f64,
        r_max: f64,
    ) -> Result<(), SetupError> {
        check_cells(ncells)?;
        check_radial(r_min, r_max)?;
        self.clear();
        self.must_add(Patch::new(
            PatchKind::Spherical(SphericalMeta::new(r_min, r_max)),
            ncells,
            DVec3::ZERO,
            DVec3::new(1.0, TWO_PI, PI),
            ALL_OUTER,
        ))?;
        debug!("selected Spherical topology: 1 patch, shell {r_min} .. {r_max}");
        Ok(())
    }

    /// Cubed sphere: six wedges in face order +x, -x, +y, -y, +z, -z
    /// (ids 0–5), then the Cartesian core (id 6). The insertion order is
    /// part of the contract: it decides which patch wins `global_to_local`
    /// on shared boundaries, and patch ids are externally visible.
    pub fn select_cubedsphere(
        &mut self,
        ncells: Index,
        cube_half: f64,
        r_inner: f64,
        r_outer: f64,
    ) -> Result<(), SetupError> {
        check_cells(ncells)?;
        check_radial(r_inner, r_outer)?;
        if cube_half <= 0.0 {
            return Err(SetupError::DegenerateCubeHalf(cube_half));
        }
        if r_inner > cube_half {
            warn!(
                "cubed-sphere core (half-width {cube_half}) does not reach the \
                 inner shell radius {r_inner}; points in the gap belong to no patch"
            );
        }
        self.clear();

        // A wedge's outer shell (high ρ) is the physical boundary; the four
        // lateral faces meet other wedges and the inner shell meets the core.
        let mut wedge_faces: PatchFaces = ALL_INNER;
        wedge_faces[1][2] = OUTER_FACE;
        let wedge_lo = DVec3::new(-1.0, -1.0, 0.0);
        let wedge_hi = DVec3::new(1.0, 1.0, 1.0);
        for face in CubeFace::ALL {
            self.must_add(Patch::new(
                PatchKind::Wedge(WedgeMeta::new(face, r_inner, r_outer)),
                ncells,
                wedge_lo,
                wedge_hi,
                wedge_faces,
            ))?;
        }
        self.must_add(Patch::new(
            PatchKind::Cartesian(CartesianMeta),
            ncells,
            DVec3::splat(-cube_half),
            DVec3::splat(cube_half),
            ALL_INNER,
        ))?;
        debug!("selected CubedSphere topology: {} patches (wedges 0-5, core 6)", self.count);
        Ok(())
    }

    fn must_add(&mut self, p: Patch) -> Result<usize, SetupError> {
        let id = self.add_patch(p);
        if id == N {
            Err(SetupError::CapacityExceeded { capacity: N })
        } else {
            Ok(id)
        }
    }
}

fn check_cells(ncells: Index) -> Result<(), SetupError> {
    if ncells.cmpgt(UVec3::ZERO).all() {
        Ok(())
    } else {
        Err(SetupError::EmptyCells(ncells))
    }
}

fn check_radial(r_min: f64, r_max: f64) -> Result<(), SetupError> {
    if r_max > r_min {
        Ok(())
    } else {
        Err(SetupError::DegenerateRadialExtent { r_min, r_max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NC: UVec3 = UVec3::new(8, 8, 8);

    #[test]
    fn add_patch_returns_sequential_ids() {
        let mut mp = MultiPatch::<4>::new();
        assert_eq!(mp.add_patch(Patch::DEFAULT), 0);
        assert_eq!(mp.add_patch(Patch::DEFAULT), 1);
        assert_eq!(mp.size(), 2);
    }

    #[test]
    fn full_container_rejects_without_growing() {
        let mut mp = MultiPatch::<2>::new();
        assert_eq!(mp.add_patch(Patch::DEFAULT), 0);
        assert_eq!(mp.add_patch(Patch::DEFAULT), 1);
        assert_eq!(mp.add_patch(Patch::DEFAULT), 2); // sentinel == capacity
        assert_eq!(mp.size(), 2);
    }

    #[test]
    fn out_of_range_id_yields_nan_sentinel() {
        let mp = MultiPatch::<4>::SINGLE_CARTESIAN;
        assert!(mp.get_patch(1).is_none());
        assert!(mp.local_to_global(1, DVec3::ZERO).is_nan());
    }

    #[test]
    fn cubedsphere_builds_seven_patches_wedges_first() {
        let mut mp = MultiPatch::<10>::new();
        mp.select_cubedsphere(NC, 1.0, 1.0, 2.0).unwrap();
        assert_eq!(mp.size(), 7);
        for id in 0..6 {
            assert!(!mp.get_patch(id).unwrap().is_cartesian());
        }
        assert!(mp.get_patch(6).unwrap().is_cartesian());
    }

    #[test]
    fn cubedsphere_assigns_points_to_the_right_patches() {
        let mut mp = MultiPatch::<MAX_PATCHES>::new();
        mp.select_cubedsphere(NC, 1.0, 1.0, 2.0).unwrap();

        // Shell point on the +x axis belongs to the +x wedge (id 0).
        let (_, id) = mp.global_to_local(DVec3::new(1.5, 0.0, 0.0));
        assert_eq!(id, 0);
        // Shell point straight down belongs to the -z wedge (id 5).
        let (_, id) = mp.global_to_local(DVec3::new(0.0, 0.0, -1.5));
        assert_eq!(id, 5);
        // Interior of the cube belongs to the core (id 6).
        let (l, id) = mp.global_to_local(DVec3::new(0.2, -0.1, 0.3));
        assert_eq!(id, 6);
        assert_eq!(l, DVec3::new(0.2, -0.1, 0.3));
        // Far outside the outer shell: nobody.
        let (l, id) = mp.global_to_local(DVec3::new(50.0, 0.0, 0.0));
        assert_eq!(id, NO_PATCH);
        assert!(l.is_nan());
    }

    #[test]
    fn shared_wedge_edge_resolves_to_first_by_insertion() {
        let mut mp = MultiPatch::<MAX_PATCHES>::new();
        mp.select_cubedsphere(NC, 1.0, 1.0, 2.0).unwrap();
        // The direction (1,1,0) lies exactly on the +x/+y wedge edge
        // (ξ = ±1 for both); the +x wedge (id 0) must win every time.
        let g = DVec3::new(1.5, 1.5, 0.0).normalize() * 1.5;
        for _ in 0..100 {
            let (l, id) = mp.global_to_local(g);
            assert_eq!(id, 0);
            assert!(mp.get_patch(0).unwrap().is_valid_local(l));
        }
    }

    #[test]
    fn reconfiguration_replaces_the_topology() {
        let mut mp = MultiPatch::<MAX_PATCHES>::new();
        mp.select_cubedsphere(NC, 1.0, 1.0, 2.0).unwrap();
        assert_eq!(mp.size(), 7);
        mp.select_cartesian(NC, DVec3::splat(-1.0), DVec3::splat(1.0))
            .unwrap();
        assert_eq!(mp.size(), 1);
        assert!(mp.get_patch(0).unwrap().is_cartesian());
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        let mut mp = MultiPatch::<MAX_PATCHES>::new();
        assert_eq!(
            mp.select_spherical(NC, 2.0, 1.0),
            Err(SetupError::DegenerateRadialExtent {
                r_min: 2.0,
                r_max: 1.0
            })
        );
        assert_eq!(
            mp.select_cartesian(UVec3::new(0, 8, 8), DVec3::ZERO, DVec3::ONE),
            Err(SetupError::EmptyCells(UVec3::new(0, 8, 8)))
        );
        assert_eq!(
            mp.select_cubedsphere(NC, -1.0, 1.0, 2.0),
            Err(SetupError::DegenerateCubeHalf(-1.0))
        );
        // A failed select leaves the container untouched.
        assert!(mp.is_empty());
    }

    #[test]
    fn cubedsphere_overflows_small_capacity() {
        let mut mp = MultiPatch::<4>::new();
        assert_eq!(
            mp.select_cubedsphere(NC, 1.0, 1.0, 2.0),
            Err(SetupError::CapacityExceeded { capacity: 4 })
        );
    }
}
