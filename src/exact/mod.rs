//! Exact (closed form or tabulated) configurations of the scalar wave system, and their
//! imposition onto grid-function storage.
//!
//! Solutions are evaluated at cartesian positions, so the same solution can be imposed on any
//! coordinate chart. They are pure functions of `(position, time)`: evaluating twice with the same
//! inputs yields bit-identical results.

use crate::field::{GridFunctionsMut, ScalarWave, SharedGridFunctions, UUGF, VVGF};

mod table;
mod wave;

pub use table::{RadialTable, TableError};
pub use wave::{PlaneWave, SphericalGaussian, WaveError};

/// Values of the evolved scalar wave fields at a single point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScalarWaveState {
    /// The scalar field.
    pub uu: f64,
    /// Time derivative of the scalar field.
    pub vv: f64,
}

impl ScalarWaveState {
    /// Writes the state into the `UUGF` and `VVGF` slots of a point, leaving every other value
    /// untouched.
    #[inline]
    pub fn store(self, mut dst: GridFunctionsMut<'_, ScalarWave>, [i0, i1, i2]: [usize; 3]) {
        dst.write(UUGF, i0, i1, i2, self.uu);
        dst.write(VVGF, i0, i1, i2, self.vv);
    }

    /// Writes the state through a shared handle.
    ///
    /// # Safety
    /// No other thread may access this point of `dst` concurrently.
    #[inline]
    pub unsafe fn store_shared(
        self,
        dst: &SharedGridFunctions<'_, ScalarWave>,
        [i0, i1, i2]: [usize; 3],
    ) {
        unsafe {
            dst.write(UUGF, i0, i1, i2, self.uu);
            dst.write(VVGF, i0, i1, i2, self.vv);
        }
    }
}

/// A known configuration of the scalar wave system.
pub trait ExactSolution: Sync {
    /// Evaluates the solution at a cartesian position and time.
    fn evaluate(&self, position: [f64; 3], time: f64) -> ScalarWaveState;

    /// Evaluates the solution and writes it into the point `index` of `dst`.
    fn impose(
        &self,
        dst: GridFunctionsMut<'_, ScalarWave>,
        index: [usize; 3],
        position: [f64; 3],
        time: f64,
    ) {
        self.evaluate(position, time).store(dst, index);
    }
}

/// Uniform data `uu = uu_in, vv = vv_in`, independent of position and time.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Constant {
    pub uu_in: f64,
    pub vv_in: f64,
}

impl ExactSolution for Constant {
    fn evaluate(&self, _position: [f64; 3], _time: f64) -> ScalarWaveState {
        ScalarWaveState {
            uu: self.uu_in,
            vv: self.vv_in,
        }
    }
}

/// Runtime selection of an exact solution.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialData {
    Constant(Constant),
    PlaneWave(PlaneWave),
    SphericalGaussian(SphericalGaussian),
    RadialTable(RadialTable),
}

impl InitialData {
    pub fn name(&self) -> &'static str {
        match self {
            InitialData::Constant(_) => "Constant",
            InitialData::PlaneWave(_) => "Plane Wave",
            InitialData::SphericalGaussian(_) => "Spherical Gaussian",
            InitialData::RadialTable(_) => "Radial Table",
        }
    }
}

impl ExactSolution for InitialData {
    fn evaluate(&self, position: [f64; 3], time: f64) -> ScalarWaveState {
        match self {
            InitialData::Constant(solution) => solution.evaluate(position, time),
            InitialData::PlaneWave(solution) => solution.evaluate(position, time),
            InitialData::SphericalGaussian(solution) => solution.evaluate(position, time),
            InitialData::RadialTable(solution) => solution.evaluate(position, time),
        }
    }
}
