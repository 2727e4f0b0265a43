//! Multipatch curvilinear coordinates
//!
//! Maps between patch-local logical coordinates and global Cartesian
//! coordinates for a closed set of structured-grid geometries (Cartesian
//! block, spherical shell, cubed-sphere wedge, cylindrical shell). All
//! inverse maps are closed-form and the first- and second-order Jacobians
//! are hand-derived, so downstream finite-difference stencils can be
//! transformed between frames without numerical differentiation.
//!
//! Everything on the per-point paths is a pure function over `Copy` data:
//! no allocation, no locking, no failure channel (out-of-domain inputs are
//! reported by the membership tests, not by errors), so the same code runs
//! on host threads and accelerator lanes.
//!
//! # References
//!
//! - C. Ronchi, R. Iacono, P. S. Paolucci, ["The 'Cubed Sphere': A New
//!   Method for the Solution of Partial Differential Equations in Spherical
//!   Geometry"](https://doi.org/10.1006/jcph.1996.0047), J. Comput. Phys.
//!   124 (1996)
//! - J. Thornburg, ["Black-hole excision with multiple grid
//!   patches"](https://doi.org/10.1088/0264-9381/21/15/003), Class. Quantum
//!   Grav. 21 (2004)

mod coords;
mod driver;
mod error;
mod multipatch;
mod patch;
mod registry;
mod tables;

pub mod cartesian;
pub mod cubed_sphere;
pub mod cylindrical;
pub mod spherical;

pub use coords::*;
pub use driver::*;
pub use error::*;
pub use multipatch::*;
pub use patch::*;
pub use registry::*;
