#![allow(clippy::needless_range_loop)]

/// Describes an abstract index space. Allows for iteration of indices
/// in N dimensions, and transformations between cartesian and linear
/// indices. The first axis is always the fastest varying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpace<const N: usize> {
    size: [usize; N],
}

impl<const N: usize> IndexSpace<N> {
    /// Constructs a new index space.
    pub const fn new(size: [usize; N]) -> Self {
        Self { size }
    }

    /// Total number of indices in the space.
    pub fn len(&self) -> usize {
        self.size.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dimensions of the index space along each axis.
    pub fn size(self) -> [usize; N] {
        self.size
    }

    /// Distance in linear index between neighbors along each axis.
    pub fn strides(self) -> [usize; N] {
        let mut result = [1; N];

        for i in 1..N {
            result[i] = result[i - 1] * self.size[i - 1];
        }

        result
    }

    /// Returns true if the cartesian index lies inside the space.
    pub fn contains(self, cartesian: [usize; N]) -> bool {
        (0..N).all(|axis| cartesian[axis] < self.size[axis])
    }

    /// Inverse of `linear_from_cartesian()`. Costs one division per axis, so prefer iterating
    /// cartesian indices directly in hot loops.
    pub fn cartesian_from_linear(self, linear: usize) -> [usize; N] {
        let strides = self.strides();
        core::array::from_fn(|axis| (linear / strides[axis]) % self.size[axis])
    }

    /// Converts a cartesian index into a linear index.
    #[inline]
    pub fn linear_from_cartesian(self, cartesian: [usize; N]) -> usize {
        let strides = self.strides();
        (0..N).map(|axis| strides[axis] * cartesian[axis]).sum()
    }

    /// Iterates every cartesian index in the space, fastest axis first.
    pub fn iter(self) -> CartesianIter<N> {
        self.window([0; N], self.size)
    }

    /// Iterates the box of indices `[origin, origin + size)`.
    pub fn window(self, origin: [usize; N], size: [usize; N]) -> CartesianIter<N> {
        debug_assert!((0..N).all(|axis| origin[axis] + size[axis] <= self.size[axis]));

        CartesianIter {
            origin,
            size,
            cursor: [0; N],
            done: size.contains(&0) || N == 0,
        }
    }

    /// Iterates the hyperplane with index `intercept` along `axis`.
    pub fn plane(self, axis: usize, intercept: usize) -> CartesianIter<N> {
        let mut origin = [0; N];
        let mut size = self.size;
        origin[axis] = intercept;
        size[axis] = 1;

        self.window(origin, size)
    }
}

/// An iterator over a box of cartesian indices.
#[derive(Debug, Clone)]
pub struct CartesianIter<const N: usize> {
    origin: [usize; N],
    size: [usize; N],
    cursor: [usize; N],
    done: bool,
}

impl<const N: usize> Iterator for CartesianIter<N> {
    type Item = [usize; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = core::array::from_fn(|axis| self.origin[axis] + self.cursor[axis]);

        // Odometer increment, wrapping each axis into the next.
        self.done = true;
        for axis in 0..N {
            self.cursor[axis] += 1;

            if self.cursor[axis] < self.size[axis] {
                self.done = false;
                break;
            }

            self.cursor[axis] = 0;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_iteration() {
        let space = IndexSpace::new([3, 2]);
        let mut indices = space.iter();

        assert_eq!(indices.next(), Some([0, 0]));
        assert_eq!(indices.next(), Some([1, 0]));
        assert_eq!(indices.next(), Some([2, 0]));
        assert_eq!(indices.next(), Some([0, 1]));
        assert_eq!(indices.next(), Some([1, 1]));
        assert_eq!(indices.next(), Some([2, 1]));
        assert_eq!(indices.next(), None);

        let space = IndexSpace::new([2, 3, 10]);
        let mut plane = space.plane(2, 5);

        assert_eq!(plane.next(), Some([0, 0, 5]));
        assert_eq!(plane.next(), Some([1, 0, 5]));
        assert_eq!(plane.next(), Some([0, 1, 5]));
        assert_eq!(plane.next(), Some([1, 1, 5]));
        assert_eq!(plane.next(), Some([0, 2, 5]));
        assert_eq!(plane.next(), Some([1, 2, 5]));
        assert_eq!(plane.next(), None);

        assert_eq!(IndexSpace::new([4, 0, 2]).iter().count(), 0);
    }

    #[test]
    fn window_iteration() {
        let space = IndexSpace::new([5, 5, 5]);
        let window: Vec<_> = space.window([1, 2, 3], [2, 1, 2]).collect();

        assert_eq!(
            window,
            vec![[1, 2, 3], [2, 2, 3], [1, 2, 4], [2, 2, 4]]
        );
    }

    #[test]
    fn index_conversion() {
        let space = IndexSpace::new([2, 4, 3]);

        assert_eq!(space.strides(), [1, 2, 8]);

        assert_eq!(space.linear_from_cartesian([1, 0, 0]), 1);
        assert_eq!(space.linear_from_cartesian([0, 1, 0]), 2);
        assert_eq!(space.linear_from_cartesian([0, 0, 2]), 8 * 2);
        assert_eq!(space.linear_from_cartesian([1, 1, 2]), 8 * 2 + 2 + 1);

        assert_eq!(space.cartesian_from_linear(1), [1, 0, 0]);
        assert_eq!(space.cartesian_from_linear(2), [0, 1, 0]);
        assert_eq!(space.cartesian_from_linear(8 * 2), [0, 0, 2]);
        assert_eq!(space.cartesian_from_linear(8 * 2 + 2 + 1), [1, 1, 2]);

        for (linear, cartesian) in space.iter().enumerate() {
            assert_eq!(space.linear_from_cartesian(cartesian), linear);
        }
    }
}
