//! Uniform, ghost-padded grids of cell-centered points and the indexing of grid functions
//! defined on them.

use crate::geometry::{CartesianIter, IndexSpace};
use std::array;
use thiserror::Error;

mod indexer;

pub use indexer::GridIndexer;

/// Error raised while setting up a grid.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one cell along axis {0}")]
    NoCells(usize),
    #[error("grid extent along axis {axis} must be positive and finite, found {size}")]
    InvalidExtent { axis: usize, size: f64 },
    #[error("grid origin along axis {axis} must be finite, found {origin}")]
    InvalidOrigin { axis: usize, origin: f64 },
}

/// Represents a rectangular region of coordinate space.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Coordinates of the lower corner (`xxmin`).
    pub origin: [f64; 3],
    /// Extent along each axis (`xxmax - xxmin`).
    pub size: [f64; 3],
}

impl Bounds {
    /// Constructs bounds from a pair of corners.
    pub fn from_aabb(aa: [f64; 3], bb: [f64; 3]) -> Self {
        Self {
            origin: aa,
            size: array::from_fn(|axis| bb[axis] - aa[axis]),
        }
    }

    pub fn aa(&self) -> [f64; 3] {
        self.origin
    }

    pub fn bb(&self) -> [f64; 3] {
        array::from_fn(|axis| self.origin[axis] + self.size[axis])
    }

    /// Returns true if the bounds contain a point.
    pub fn contains(&self, point: [f64; 3]) -> bool {
        let bb = self.bb();
        (0..3).all(|axis| point[axis] >= self.origin[axis] && point[axis] <= bb[axis])
    }
}

/// A uniform grid of `cells` cell-centered points per axis, padded by `ghost` points on every
/// face.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GridSpaceData")]
pub struct GridSpace {
    /// Number of interior points along each axis (`Nxx`).
    cells: [usize; 3],
    /// Number of ghost points on each face (`NGHOSTS`).
    ghost: usize,
    /// Coordinate domain covered by the interior points.
    bounds: Bounds,
}

impl GridSpace {
    pub fn new(cells: [usize; 3], ghost: usize, bounds: Bounds) -> Result<Self, GridError> {
        for axis in 0..3 {
            if cells[axis] == 0 {
                return Err(GridError::NoCells(axis));
            }

            let size = bounds.size[axis];
            if !(size.is_finite() && size > 0.0) {
                return Err(GridError::InvalidExtent { axis, size });
            }

            let origin = bounds.origin[axis];
            if !origin.is_finite() {
                return Err(GridError::InvalidOrigin { axis, origin });
            }
        }

        Ok(Self {
            cells,
            ghost,
            bounds,
        })
    }

    pub fn cells(&self) -> [usize; 3] {
        self.cells
    }

    pub fn ghost(&self) -> usize {
        self.ghost
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of points along each axis, including ghost points (`Nxx_plus_2NGHOSTS`).
    pub fn size(&self) -> [usize; 3] {
        array::from_fn(|axis| self.cells[axis] + 2 * self.ghost)
    }

    /// The total number of points on the grid.
    pub fn num_points(&self) -> usize {
        self.size().iter().product()
    }

    /// Coordinate spacing along each axis (`dxx`).
    pub fn spacing(&self) -> [f64; 3] {
        array::from_fn(|axis| self.bounds.size[axis] / self.cells[axis] as f64)
    }

    /// Coordinates of a point. Points are cell centered, so the first interior point sits half a
    /// spacing inside the lower bound and ghost points continue the pattern outside of it.
    pub fn position(&self, index: [usize; 3]) -> [f64; 3] {
        let spacing = self.spacing();

        array::from_fn(|axis| {
            let offset = index[axis] as f64 - self.ghost as f64 + 0.5;
            self.bounds.origin[axis] + offset * spacing[axis]
        })
    }

    /// Builds an indexer for `num_gfs` grid functions living on this grid.
    pub fn indexer(&self, num_gfs: usize) -> GridIndexer {
        GridIndexer::new(self.size(), num_gfs)
    }

    /// Index space of every point, including ghosts.
    pub fn points(&self) -> IndexSpace<3> {
        IndexSpace::new(self.size())
    }

    /// Iterates every interior (non-ghost) point.
    pub fn interior(&self) -> CartesianIter<3> {
        self.points().window([self.ghost; 3], self.cells)
    }

    /// Returns true if the point is not a ghost point.
    pub fn is_interior(&self, index: [usize; 3]) -> bool {
        (0..3).all(|axis| index[axis] >= self.ghost && index[axis] < self.ghost + self.cells[axis])
    }
}

/// Unvalidated form of `GridSpace`, as read from disk.
#[derive(serde::Deserialize)]
struct GridSpaceData {
    cells: [usize; 3],
    ghost: usize,
    bounds: Bounds,
}

impl TryFrom<GridSpaceData> for GridSpace {
    type Error = GridError;

    fn try_from(data: GridSpaceData) -> Result<Self, Self::Error> {
        GridSpace::new(data.cells, data.ghost, data.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpace {
        GridSpace::new(
            [4, 2, 8],
            2,
            Bounds::from_aabb([0.0, -1.0, 0.0], [2.0, 1.0, 4.0]),
        )
        .unwrap()
    }

    #[test]
    fn extents() {
        let grid = grid();

        assert_eq!(grid.size(), [8, 6, 12]);
        assert_eq!(grid.num_points(), 8 * 6 * 12);
        assert_eq!(grid.spacing(), [0.5, 1.0, 0.5]);
        assert_eq!(grid.indexer(2).len(), 2 * 8 * 6 * 12);
        assert_eq!(grid.interior().count(), 4 * 2 * 8);
        assert!(grid.interior().all(|index| grid.is_interior(index)));
        assert!(!grid.is_interior([1, 2, 2]));
        assert!(!grid.is_interior([2, 4, 2]));
    }

    #[test]
    fn cell_centered_positions() {
        let grid = grid();

        assert_eq!(grid.position([2, 2, 2]), [0.25, -0.5, 0.25]);
        assert_eq!(grid.position([5, 3, 9]), [1.75, 0.5, 3.75]);
        // Ghost points mirror the interior across the lower bound.
        assert_eq!(grid.position([1, 1, 1]), [-0.25, -1.5, -0.25]);

        let bounds = grid.bounds();
        assert!(grid.interior().all(|index| bounds.contains(grid.position(index))));
    }

    #[test]
    fn invalid_grids() {
        let bounds = Bounds::from_aabb([0.0; 3], [1.0; 3]);

        assert_eq!(
            GridSpace::new([4, 0, 4], 1, bounds),
            Err(GridError::NoCells(1))
        );
        assert_eq!(
            GridSpace::new([4, 4, 4], 1, Bounds::from_aabb([0.0; 3], [1.0, 1.0, 0.0])),
            Err(GridError::InvalidExtent { axis: 2, size: 0.0 })
        );
        assert!(matches!(
            GridSpace::new(
                [4, 4, 4],
                1,
                Bounds {
                    origin: [f64::NAN, 0.0, 0.0],
                    size: [1.0; 3]
                }
            ),
            Err(GridError::InvalidOrigin { axis: 0, .. })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let grid = grid();
        let text = ron::to_string(&grid).unwrap();
        assert_eq!(ron::from_str::<GridSpace>(&text).unwrap(), grid);

        let empty = GridSpace {
            cells: [0, 4, 4],
            ..grid.clone()
        };
        let text = ron::to_string(&empty).unwrap();
        assert!(ron::from_str::<GridSpace>(&text).is_err());

        let flat = GridSpace {
            bounds: Bounds {
                origin: [0.0; 3],
                size: [1.0, -1.0, 1.0],
            },
            ..grid
        };
        let text = ron::to_string(&flat).unwrap();
        assert!(ron::from_str::<GridSpace>(&text).is_err());
    }
}
