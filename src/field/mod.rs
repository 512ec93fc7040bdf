//! Grid functions: the labels that name them and the field-major store that holds them.
//!
//! A grid function is a scalar field stored at every point of the grid. Each set of grid
//! functions is described by a label type implementing `GridFunction`, whose variants are
//! densely numbered from zero. That numbering is part of the storage layout (see `GridIndexer`),
//! so it must never change between the kernels sharing a buffer.

mod store;

pub use store::{GridFunctionStore, GridFunctionsMut, GridFunctionsRef, SharedGridFunctions};

/// A label for one member of a fixed set of grid functions.
pub trait GridFunction: Copy + Send + Sync + 'static {
    /// Name of the set of grid functions, used for serialization.
    const SYSTEM_NAME: &'static str;
    /// Number of grid functions in the set.
    const COUNT: usize;

    /// Dense index of this grid function, in `0..COUNT`.
    fn index(self) -> usize;

    /// Inverse of `index()`.
    fn from_index(index: usize) -> Self;

    /// Human readable name of the grid function.
    fn name(self) -> &'static str;

    /// Enumerates every grid function in index order.
    fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index)
    }
}

/// Evolved grid functions of the scalar wave system: the field `uu` and its time derivative `vv`.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScalarWave {
    Uu = 0,
    Vv = 1,
}

/// Grid function index of the scalar field.
pub const UUGF: ScalarWave = ScalarWave::Uu;
/// Grid function index of the scalar field's time derivative.
pub const VVGF: ScalarWave = ScalarWave::Vv;
/// Number of evolved grid functions.
pub const NUM_EVOL_GFS: usize = <ScalarWave as GridFunction>::COUNT;

impl GridFunction for ScalarWave {
    const SYSTEM_NAME: &'static str = "ScalarWave";
    const COUNT: usize = 2;

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Uu,
            1 => Self::Vv,
            _ => panic!("invalid scalar wave grid function index {index}"),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Uu => "uu",
            Self::Vv => "vv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_numbering() {
        assert_eq!(UUGF.index(), 0);
        assert_eq!(VVGF.index(), 1);
        assert_eq!(NUM_EVOL_GFS, 2);

        let labels: Vec<_> = ScalarWave::all().collect();
        assert_eq!(labels, vec![UUGF, VVGF]);

        for label in ScalarWave::all() {
            assert_eq!(ScalarWave::from_index(label.index()), label);
        }

        assert_eq!(VVGF.name(), "vv");
    }
}
