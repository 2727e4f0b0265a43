//! Process-wide active configuration: built once by setup, read by every
//! per-point evaluation afterwards.

use crate::coords::Coord;
use crate::error::SetupError;
use crate::multipatch::{MultiPatch, MAX_PATCHES};
use crate::patch::Patch;
use glam::{DVec3, UVec3};
use log::info;
use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard};

/// Which named topology is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchSystem {
    Cartesian,
    Spherical,
    CubedSphere,
}

impl FromStr for PatchSystem {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cartesian" => Ok(Self::Cartesian),
            "Spherical" => Ok(Self::Spherical),
            "CubedSphere" => Ok(Self::CubedSphere),
            _ => Err(SetupError::UnknownPatchSystem(s.to_owned())),
        }
    }
}

/// Already-parsed setup parameters, one field per knob of the external
/// parameter layer. Only the fields of the selected system are read.
#[derive(Clone, Copy, Debug)]
pub struct SetupConfig {
    pub system: PatchSystem,
    pub ncells: UVec3,
    pub cartesian_xmin: DVec3,
    pub cartesian_xmax: DVec3,
    pub spherical_r_min: f64,
    pub spherical_r_max: f64,
    pub cubedsphere_r_inner: f64,
    pub cubedsphere_r_outer: f64,
    pub cubedsphere_cube_half: f64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            system: PatchSystem::Cartesian,
            ncells: UVec3::splat(32),
            cartesian_xmin: DVec3::splat(-1.0),
            cartesian_xmax: DVec3::splat(1.0),
            spherical_r_min: 1.0,
            spherical_r_max: 2.0,
            cubedsphere_r_inner: 1.0,
            cubedsphere_r_outer: 2.0,
            cubedsphere_cube_half: 1.0,
        }
    }
}

/// The configured topology: the system selector plus its patch container,
/// replaced wholesale on every [`configure`].
#[derive(Clone, Copy, Debug)]
pub struct ActiveMultiPatch {
    system: PatchSystem,
    mp: MultiPatch<MAX_PATCHES>,
}

impl ActiveMultiPatch {
    pub fn system(&self) -> PatchSystem {
        self.system
    }

    pub fn size(&self) -> usize {
        self.mp.size()
    }

    pub fn get_patch(&self, id: usize) -> Option<&Patch> {
        self.mp.get_patch(id)
    }

    pub fn local_to_global(&self, id: usize, l: Coord) -> Coord {
        self.mp.local_to_global(id, l)
    }

    pub fn global_to_local(&self, g: Coord) -> (Coord, usize) {
        self.mp.global_to_local(g)
    }

    pub fn multipatch(&self) -> &MultiPatch<MAX_PATCHES> {
        &self.mp
    }
}

static ACTIVE: RwLock<ActiveMultiPatch> = RwLock::new(ActiveMultiPatch {
    system: PatchSystem::Cartesian,
    mp: MultiPatch::SINGLE_CARTESIAN,
});

/// Builds the requested topology and replaces the active configuration
/// wholesale. Must complete before any reader runs and must not run
/// concurrently with readers; that phase separation is the calling driver's
/// contract.
pub fn configure(cfg: &SetupConfig) -> Result<(), SetupError> {
    let mut mp = MultiPatch::new();
    match cfg.system {
        PatchSystem::Cartesian => {
            mp.select_cartesian(cfg.ncells, cfg.cartesian_xmin, cfg.cartesian_xmax)?
        }
        PatchSystem::Spherical => {
            mp.select_spherical(cfg.ncells, cfg.spherical_r_min, cfg.spherical_r_max)?
        }
        PatchSystem::CubedSphere => mp.select_cubedsphere(
            cfg.ncells,
            cfg.cubedsphere_cube_half,
            cfg.cubedsphere_r_inner,
            cfg.cubedsphere_r_outer,
        )?,
    }
    let next = ActiveMultiPatch {
        system: cfg.system,
        mp,
    };
    *ACTIVE.write().expect("active multipatch lock poisoned") = next;
    info!(
        "configured {:?} multi-patch system with {} patch(es)",
        cfg.system,
        next.size()
    );
    Ok(())
}

/// Read access to the active configuration. Hold the guard across a batch
/// of point queries rather than reacquiring per point.
pub fn active() -> RwLockReadGuard<'static, ActiveMultiPatch> {
    ACTIVE.read().expect("active multipatch lock poisoned")
}
