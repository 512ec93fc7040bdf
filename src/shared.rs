use std::{cell::UnsafeCell, marker::PhantomData, slice};

/// A reference to a mutable slice which may be shared among threads. Writes go through
/// `UnsafeCell`, so it is the responsibility of the user that no two threads touch the same
/// element concurrently.
pub struct SharedSlice<'a, T> {
    data: &'a [SyncUnsafeCell<T>],
    _marker: PhantomData<&'a mut [T]>,
}

impl<T> Clone for SharedSlice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SharedSlice<'_, T> {}

impl<'a, T> SharedSlice<'a, T> {
    pub fn new(data: &'a mut [T]) -> Self {
        let len = data.len();
        // `SyncUnsafeCell<T>` is `repr(transparent)` over `T`, and the exclusive borrow
        // guarantees nothing else observes the data for `'a`.
        let data =
            unsafe { slice::from_raw_parts(data.as_mut_ptr() as *const SyncUnsafeCell<T>, len) };

        Self {
            data,
            _marker: PhantomData,
        }
    }

    pub fn len(self) -> usize {
        self.data.len()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Reads the `index`th element of the slice.
    ///
    /// # Safety
    /// No other thread may be writing to this element while it is read.
    pub unsafe fn read(self, index: usize) -> T
    where
        T: Copy,
    {
        unsafe { *self.data[index].get() }
    }

    /// Overwrites the `index`th element of the slice.
    ///
    /// # Safety
    /// No other thread may be reading or writing this element concurrently.
    pub unsafe fn write(self, index: usize, value: T) {
        unsafe { *self.data[index].get() = value }
    }
}

/// Wrapper around `UnsafeCell` that also implements sync.
#[repr(transparent)]
struct SyncUnsafeCell<T: ?Sized> {
    value: UnsafeCell<T>,
}

unsafe impl<T: ?Sized + Sync> Sync for SyncUnsafeCell<T> {}

impl<T: ?Sized> SyncUnsafeCell<T> {
    const fn get(&self) -> *mut T {
        self.value.get()
    }
}
