//! Owned, uninitialized element storage.
//!
//! A [`RawStorage`] is the leaf of the ownership model: exactly one
//! instance owns a given block, ownership moves only through
//! [`swap`](RawStorage::swap), [`take`](RawStorage::take) or a Rust move,
//! and the block is never resized in place. Growing means allocating a new
//! `RawStorage` and swapping it in.

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;
use std::slice;

use advec_core::StorageError;

use crate::alloc::{allocate_cells, release_cells};

/// A block of `capacity` uninitialized cells for `T`.
///
/// The storage never constructs or drops a `T`. Dropping a `RawStorage`
/// releases its memory and nothing else: any value still written into a
/// cell is forgotten. There is deliberately no `Clone` impl; duplicating
/// cells requires knowing which of them are live.
pub struct RawStorage<T> {
    /// Start of the block. `None` when nothing was allocated: capacity 0,
    /// or a zero-sized `T`.
    ptr: Option<NonNull<T>>,
    /// Number of cells the block was allocated for.
    capacity: usize,
    _marker: PhantomData<T>,
}

// SAFETY: RawStorage uniquely owns its block, like Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: shared access only hands out shared references to cells.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// An empty storage with no block.
    pub const fn new() -> Self {
        Self {
            ptr: None,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate a block for `capacity` cells.
    ///
    /// A capacity of 0 allocates nothing. Zero-sized element types never
    /// allocate but still report `capacity`.
    ///
    /// # Errors
    ///
    /// [`StorageError::CapacityOverflow`] if the byte size does not fit a
    /// layout, [`StorageError::AllocationFailed`] if the allocator refuses.
    pub fn allocate(capacity: usize) -> Result<Self, StorageError> {
        let ptr = allocate_cells::<T>(capacity)?;
        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Number of cells in the block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` if this storage owns allocated memory.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    #[inline]
    fn base(&self) -> NonNull<T> {
        self.ptr.unwrap_or(NonNull::dangling())
    }

    /// Pointer to the first cell.
    ///
    /// Dangling (but aligned and non-null) when nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.base().as_ptr()
    }

    /// Mutable pointer to the first cell.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.base().as_ptr()
    }

    /// Address of the cell `offset` places past the start.
    ///
    /// `offset == capacity` (one past the end) is allowed.
    ///
    /// # Panics
    ///
    /// Panics if `offset > capacity`.
    #[inline]
    pub fn address_at(&self, offset: usize) -> *const T {
        assert!(
            offset <= self.capacity,
            "offset {offset} past end of storage (capacity {})",
            self.capacity
        );
        // SAFETY: offset <= capacity, so the result is within the block or
        // one past its end. For an unallocated block both are 0 bytes away.
        unsafe { self.as_ptr().add(offset) }
    }

    /// Mutable address of the cell `offset` places past the start.
    ///
    /// # Panics
    ///
    /// Panics if `offset > capacity`.
    #[inline]
    pub fn address_at_mut(&mut self, offset: usize) -> *mut T {
        assert!(
            offset <= self.capacity,
            "offset {offset} past end of storage (capacity {})",
            self.capacity
        );
        // SAFETY: as in `address_at`.
        unsafe { self.as_mut_ptr().add(offset) }
    }

    /// Shared access to cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn slot(&self, index: usize) -> &MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "cell {index} out of range (capacity {})",
            self.capacity
        );
        // SAFETY: index < capacity, the cell lies inside the block, and
        // MaybeUninit<T> has the same layout as T with no validity demand.
        unsafe { &*self.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Mutable access to cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "cell {index} out of range (capacity {})",
            self.capacity
        );
        // SAFETY: as in `slot`; `&mut self` guarantees exclusivity.
        unsafe { &mut *self.as_mut_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// The whole block as a slice of uninitialized cells.
    #[inline]
    pub fn cells(&self) -> &[MaybeUninit<T>] {
        // SAFETY: the block holds `capacity` cells (or is zero bytes with a
        // dangling, aligned base); MaybeUninit needs no initialization.
        unsafe { slice::from_raw_parts(self.as_ptr().cast(), self.capacity) }
    }

    /// The whole block as a mutable slice of uninitialized cells.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: as in `cells`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr().cast(), self.capacity) }
    }

    /// Exchange blocks with `other`. Never fails, never allocates.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the block out, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: `ptr` came from `allocate_cells::<T>(self.capacity)`
            // and `take()` above guarantees it is released only once.
            unsafe { release_cells(ptr, self.capacity) };
        }
    }
}

impl<T> fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("address", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}
