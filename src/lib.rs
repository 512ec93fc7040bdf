#![allow(clippy::needless_range_loop)]

//! Grid-function storage, indexing, and per-point evaluation kernels for finite difference
//! scalar field collapse codes.
//!
//! The crate is built around a flattened, field-major buffer of grid functions
//! (`GridFunctionStore`) addressed through a `GridIndexer`. Point kernels (exact solutions,
//! coordinate line-element factors) read a point's coordinates and write only that point's slots,
//! so whole-grid passes in `evaluate` can be dispatched in parallel over disjoint index ranges.

pub mod checkpoint;
pub mod coords;
pub mod evaluate;
pub mod exact;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod shared;

/// Provides the common types used by most applications.
pub mod prelude {
    pub use crate::checkpoint::Checkpoint;
    pub use crate::coords::{
        Cartesian, Chart, CoordSystem, Cylindrical, Spherical, ds_dirn_spherical,
    };
    pub use crate::evaluate::{
        FieldError, error_norms, find_timestep, impose_exact_solution, min_proper_spacing,
    };
    pub use crate::exact::{
        Constant, ExactSolution, InitialData, PlaneWave, RadialTable, ScalarWaveState,
        SphericalGaussian,
    };
    pub use crate::field::{
        GridFunction, GridFunctionStore, GridFunctionsMut, GridFunctionsRef, NUM_EVOL_GFS,
        ScalarWave, SharedGridFunctions, UUGF, VVGF,
    };
    pub use crate::geometry::IndexSpace;
    pub use crate::grid::{Bounds, GridError, GridIndexer, GridSpace};
}
