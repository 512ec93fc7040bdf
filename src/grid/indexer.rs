use crate::geometry::IndexSpace;

/// Maps a grid function and a point index `(i0, i1, i2)` onto an offset into a flattened,
/// field-major buffer.
///
/// The layout is
///
/// ```text
/// offset = i0 + N0 * (i1 + N1 * (i2 + N2 * gf))
/// ```
///
/// where `N0, N1, N2` are the ghost-padded extents of the grid. `i0` is the fastest varying axis
/// and each grid function occupies its own contiguous slice of `N0 * N1 * N2` values. All code
/// sharing a buffer must agree on this ordering.
///
/// Per-axis indices are only checked in debug builds. Callers must keep `i < N` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridIndexer {
    size: [usize; 3],
    num_gfs: usize,
}

impl GridIndexer {
    /// Builds an indexer for `num_gfs` grid functions on a grid with the given (ghost-padded)
    /// extents.
    pub const fn new(size: [usize; 3], num_gfs: usize) -> Self {
        Self { size, num_gfs }
    }

    /// Ghost-padded extents of the grid along each axis.
    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    /// Number of grid functions laid out in the buffer.
    pub fn num_gfs(&self) -> usize {
        self.num_gfs
    }

    /// Number of points in a single grid function.
    pub fn num_points(&self) -> usize {
        self.size.iter().product()
    }

    /// Total length of the buffer addressed by this indexer.
    pub fn len(&self) -> usize {
        self.num_points() * self.num_gfs
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change in offset from incrementing `i0`, `i1` and `i2` respectively.
    pub fn strides(&self) -> [usize; 3] {
        self.points().strides()
    }

    /// Change in offset from incrementing the grid function.
    pub fn gf_stride(&self) -> usize {
        self.num_points()
    }

    /// The index space of points within one grid function.
    pub fn points(&self) -> IndexSpace<3> {
        IndexSpace::new(self.size)
    }

    /// Offset of a point within a single grid function (`IDX3`).
    #[inline]
    pub fn point_offset(&self, i0: usize, i1: usize, i2: usize) -> usize {
        debug_assert!(i0 < self.size[0] && i1 < self.size[1] && i2 < self.size[2]);
        i0 + self.size[0] * (i1 + self.size[1] * i2)
    }

    /// Offset of a point of grid function `gf` in the flattened buffer (`IDX4`).
    #[inline]
    pub fn offset(&self, gf: usize, i0: usize, i1: usize, i2: usize) -> usize {
        debug_assert!(gf < self.num_gfs);
        self.point_offset(i0, i1, i2) + self.gf_stride() * gf
    }

    /// Inverse of `offset()`, returning `(gf, [i0, i1, i2])`.
    pub fn index_from_offset(&self, offset: usize) -> (usize, [usize; 3]) {
        let [i0, i1, i2, gf] = IndexSpace::new([
            self.size[0],
            self.size[1],
            self.size[2],
            self.num_gfs,
        ])
        .cartesian_from_linear(offset);

        (gf, [i0, i1, i2])
    }
}
