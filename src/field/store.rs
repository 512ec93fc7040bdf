use crate::field::GridFunction;
use crate::grid::{GridIndexer, GridSpace};
use crate::shared::SharedSlice;
use datasize::DataSize;
use reborrow::{Reborrow, ReborrowMut};
use std::marker::PhantomData;

/// Owns the values of every grid function in the set `G` at every point of a grid, stored
/// field-major in a single flattened buffer (see `GridIndexer` for the layout).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound = "")]
pub struct GridFunctionStore<G: GridFunction> {
    data: Vec<f64>,
    indexer: GridIndexer,
    #[serde(skip)]
    _marker: PhantomData<G>,
}

impl<G: GridFunction> GridFunctionStore<G> {
    /// Allocates a zeroed store for a grid with the given (ghost-padded) extents.
    pub fn new(size: [usize; 3]) -> Self {
        let indexer = GridIndexer::new(size, G::COUNT);

        Self {
            data: vec![0.0; indexer.len()],
            indexer,
            _marker: PhantomData,
        }
    }

    /// Allocates a zeroed store covering every point of `grid`.
    pub fn from_grid(grid: &GridSpace) -> Self {
        Self::new(grid.size())
    }

    /// Wraps an existing buffer, which must already be laid out field-major for `size`.
    pub fn from_storage(data: Vec<f64>, size: [usize; 3]) -> Self {
        let indexer = GridIndexer::new(size, G::COUNT);
        assert_eq!(
            data.len(),
            indexer.len(),
            "buffer length does not match grid extents"
        );

        Self {
            data,
            indexer,
            _marker: PhantomData,
        }
    }

    /// Transforms the store back into a linear vector.
    pub fn into_storage(self) -> Vec<f64> {
        self.data
    }

    pub fn storage(&self) -> &[f64] {
        &self.data
    }

    pub fn storage_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn indexer(&self) -> GridIndexer {
        self.indexer
    }

    /// Ghost-padded extents of the underlying grid.
    pub fn size(&self) -> [usize; 3] {
        self.indexer.size()
    }

    /// Reads the value of `gf` at a point.
    #[inline]
    pub fn read(&self, gf: G, i0: usize, i1: usize, i2: usize) -> f64 {
        self.data[self.indexer.offset(gf.index(), i0, i1, i2)]
    }

    /// Overwrites the value of `gf` at a point. No other value is touched.
    #[inline]
    pub fn write(&mut self, gf: G, i0: usize, i1: usize, i2: usize, value: f64) {
        self.data[self.indexer.offset(gf.index(), i0, i1, i2)] = value;
    }

    /// Retrieves the contiguous values of a single grid function.
    pub fn field(&self, gf: G) -> &[f64] {
        let stride = self.indexer.gf_stride();
        &self.data[stride * gf.index()..stride * (gf.index() + 1)]
    }

    /// Retrieves the contiguous values of a single grid function mutably.
    pub fn field_mut(&mut self, gf: G) -> &mut [f64] {
        let stride = self.indexer.gf_stride();
        &mut self.data[stride * gf.index()..stride * (gf.index() + 1)]
    }

    /// Sets every value of every grid function.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Borrows the store immutably.
    pub fn view(&self) -> GridFunctionsRef<'_, G> {
        GridFunctionsRef {
            data: &self.data,
            indexer: self.indexer,
            _marker: PhantomData,
        }
    }

    /// Borrows the store mutably.
    pub fn view_mut(&mut self) -> GridFunctionsMut<'_, G> {
        GridFunctionsMut {
            data: &mut self.data,
            indexer: self.indexer,
            _marker: PhantomData,
        }
    }

    /// Borrows the store as a handle that may be written from several threads at once.
    pub fn shared(&mut self) -> SharedGridFunctions<'_, G> {
        SharedGridFunctions {
            data: SharedSlice::new(&mut self.data),
            indexer: self.indexer,
            _marker: PhantomData,
        }
    }
}

impl<G: GridFunction> DataSize for GridFunctionStore<G> {
    const IS_DYNAMIC: bool = true;
    const STATIC_HEAP_SIZE: usize = 0;

    fn estimate_heap_size(&self) -> usize {
        self.data.capacity() * size_of::<f64>()
    }
}

/// Immutable borrowed access to a set of grid functions.
pub struct GridFunctionsRef<'a, G: GridFunction> {
    data: &'a [f64],
    indexer: GridIndexer,
    _marker: PhantomData<G>,
}

impl<G: GridFunction> Clone for GridFunctionsRef<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GridFunction> Copy for GridFunctionsRef<'_, G> {}

impl<'a, G: GridFunction> GridFunctionsRef<'a, G> {
    pub fn indexer(&self) -> GridIndexer {
        self.indexer
    }

    #[inline]
    pub fn read(&self, gf: G, i0: usize, i1: usize, i2: usize) -> f64 {
        self.data[self.indexer.offset(gf.index(), i0, i1, i2)]
    }

    pub fn field(&self, gf: G) -> &'a [f64] {
        let stride = self.indexer.gf_stride();
        &self.data[stride * gf.index()..stride * (gf.index() + 1)]
    }
}

impl<'short, G: GridFunction> Reborrow<'short> for GridFunctionsRef<'_, G> {
    type Target = GridFunctionsRef<'short, G>;

    fn rb(&'short self) -> Self::Target {
        *self
    }
}

/// Mutable borrowed access to a set of grid functions.
pub struct GridFunctionsMut<'a, G: GridFunction> {
    data: &'a mut [f64],
    indexer: GridIndexer,
    _marker: PhantomData<G>,
}

impl<G: GridFunction> GridFunctionsMut<'_, G> {
    pub fn indexer(&self) -> GridIndexer {
        self.indexer
    }

    #[inline]
    pub fn read(&self, gf: G, i0: usize, i1: usize, i2: usize) -> f64 {
        self.data[self.indexer.offset(gf.index(), i0, i1, i2)]
    }

    #[inline]
    pub fn write(&mut self, gf: G, i0: usize, i1: usize, i2: usize, value: f64) {
        self.data[self.indexer.offset(gf.index(), i0, i1, i2)] = value;
    }

    pub fn field(&self, gf: G) -> &[f64] {
        let stride = self.indexer.gf_stride();
        &self.data[stride * gf.index()..stride * (gf.index() + 1)]
    }

    pub fn field_mut(&mut self, gf: G) -> &mut [f64] {
        let stride = self.indexer.gf_stride();
        &mut self.data[stride * gf.index()..stride * (gf.index() + 1)]
    }
}

impl<'short, G: GridFunction> Reborrow<'short> for GridFunctionsMut<'_, G> {
    type Target = GridFunctionsRef<'short, G>;

    fn rb(&'short self) -> Self::Target {
        GridFunctionsRef {
            data: &*self.data,
            indexer: self.indexer,
            _marker: PhantomData,
        }
    }
}

impl<'short, G: GridFunction> ReborrowMut<'short> for GridFunctionsMut<'_, G> {
    type Target = GridFunctionsMut<'short, G>;

    fn rb_mut(&'short mut self) -> Self::Target {
        GridFunctionsMut {
            data: &mut *self.data,
            indexer: self.indexer,
            _marker: PhantomData,
        }
    }
}

/// A handle to a set of grid functions that can be copied into several threads and written
/// concurrently. Every access is `unsafe`: the caller must partition the points so that no two
/// threads touch the same `(gf, i0, i1, i2)` at the same time.
pub struct SharedGridFunctions<'a, G: GridFunction> {
    data: SharedSlice<'a, f64>,
    indexer: GridIndexer,
    _marker: PhantomData<G>,
}

impl<G: GridFunction> Clone for SharedGridFunctions<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GridFunction> Copy for SharedGridFunctions<'_, G> {}

impl<G: GridFunction> SharedGridFunctions<'_, G> {
    pub fn indexer(&self) -> GridIndexer {
        self.indexer
    }

    /// Reads the value of `gf` at a point.
    ///
    /// # Safety
    /// No other thread may be writing this point of `gf` concurrently.
    #[inline]
    pub unsafe fn read(&self, gf: G, i0: usize, i1: usize, i2: usize) -> f64 {
        unsafe { self.data.read(self.indexer.offset(gf.index(), i0, i1, i2)) }
    }

    /// Overwrites the value of `gf` at a point.
    ///
    /// # Safety
    /// No other thread may be reading or writing this point of `gf` concurrently.
    #[inline]
    pub unsafe fn write(&self, gf: G, i0: usize, i1: usize, i2: usize, value: f64) {
        unsafe {
            self.data
                .write(self.indexer.offset(gf.index(), i0, i1, i2), value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ScalarWave, UUGF, VVGF};
    use rand::Rng;

    #[test]
    fn write_then_read() {
        let mut store = GridFunctionStore::<ScalarWave>::new([8, 6, 10]);
        store.fill(0.5);

        store.write(UUGF, 4, 2, 7, 3.5);
        store.write(VVGF, 4, 2, 7, -1.25);

        assert_eq!(store.read(UUGF, 4, 2, 7), 3.5);
        assert_eq!(store.read(VVGF, 4, 2, 7), -1.25);

        let indexer = store.indexer();
        let touched = [
            indexer.offset(UUGF.index(), 4, 2, 7),
            indexer.offset(VVGF.index(), 4, 2, 7),
        ];

        for (offset, value) in store.storage().iter().enumerate() {
            if !touched.contains(&offset) {
                assert_eq!(*value, 0.5, "offset {offset} was modified");
            }
        }
    }

    #[test]
    fn random_round_trip() {
        let size = [5, 7, 3];
        let mut store = GridFunctionStore::<ScalarWave>::new(size);
        let mut rng = rand::rng();

        for _ in 0..200 {
            let gf = ScalarWave::from_index(rng.random_range(0..2));
            let index: [usize; 3] = std::array::from_fn(|axis| rng.random_range(0..size[axis]));
            let value: f64 = rng.random_range(-1e6..1e6);

            let before = store.storage().to_vec();
            store.write(gf, index[0], index[1], index[2], value);

            assert_eq!(store.read(gf, index[0], index[1], index[2]), value);

            let offset = store.indexer().offset(gf.index(), index[0], index[1], index[2]);
            let changed = before
                .iter()
                .zip(store.storage())
                .enumerate()
                .filter(|(i, (a, b))| *i != offset && a != b)
                .count();
            assert_eq!(changed, 0);
        }
    }

    #[test]
    fn fields_and_views() {
        let mut store = GridFunctionStore::<ScalarWave>::new([2, 2, 2]);
        store.field_mut(VVGF).fill(2.0);

        assert!(store.field(UUGF).iter().all(|v| *v == 0.0));
        assert!(store.field(VVGF).iter().all(|v| *v == 2.0));
        assert_eq!(&store.storage()[8..], &[2.0; 8]);

        {
            let mut view = store.view_mut();
            view.write(UUGF, 1, 1, 1, 4.0);

            let mut inner = view.rb_mut();
            inner.write(UUGF, 0, 1, 0, 5.0);

            assert_eq!(view.rb().read(UUGF, 1, 1, 1), 4.0);
        }

        assert_eq!(store.view().field(UUGF)[7], 4.0);
        assert_eq!(store.view().read(UUGF, 0, 1, 0), 5.0);
        assert_eq!(store.estimate_heap_size(), 16 * size_of::<f64>());

        let data = store.clone().into_storage();
        let rebuilt = GridFunctionStore::<ScalarWave>::from_storage(data, [2, 2, 2]);
        assert_eq!(rebuilt.storage(), store.storage());
    }

    #[test]
    fn shared_writes() {
        let mut store = GridFunctionStore::<ScalarWave>::new([4, 4, 4]);

        {
            let shared = store.shared();

            std::thread::scope(|scope| {
                for i2 in 0..4 {
                    scope.spawn(move || {
                        for i1 in 0..4 {
                            for i0 in 0..4 {
                                unsafe {
                                    shared.write(UUGF, i0, i1, i2, (i0 + i1 + i2) as f64);
                                }
                            }
                        }
                    });
                }
            });

            // Each thread derives one plane of VVGF from the UUGF values written above.
            std::thread::scope(|scope| {
                for i2 in 0..4 {
                    scope.spawn(move || {
                        for i1 in 0..4 {
                            for i0 in 0..4 {
                                unsafe {
                                    let uu = shared.read(UUGF, i0, i1, i2);
                                    shared.write(VVGF, i0, i1, i2, uu - (i0 + i1) as f64);
                                }
                            }
                        }
                    });
                }
            });

            assert_eq!(unsafe { shared.read(UUGF, 1, 2, 3) }, 6.0);
            assert_eq!(unsafe { shared.read(VVGF, 1, 2, 3) }, 3.0);
        }

        for [i0, i1, i2] in store.indexer().points().iter() {
            assert_eq!(store.read(UUGF, i0, i1, i2), (i0 + i1 + i2) as f64);
            assert_eq!(store.read(VVGF, i0, i1, i2), i2 as f64);
        }
    }
}
