//! Geometric primitives for working with cartesian indices.

mod indices;

pub use indices::{CartesianIter, IndexSpace};
