//! Byte allocation capability used by [`RawStorage`](crate::RawStorage).
//!
//! Thin wrappers around the global allocator. A null return is turned into
//! [`StorageError::AllocationFailed`] rather than aborting, so callers can
//! propagate it. Zero-sized requests never reach the allocator.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use advec_core::StorageError;

/// Layout for `capacity` cells of `T`.
pub(crate) fn layout_for<T>(capacity: usize) -> Result<Layout, StorageError> {
    Layout::array::<T>(capacity).map_err(|_| StorageError::CapacityOverflow {
        requested: capacity,
    })
}

/// Allocate a block for `capacity` cells of `T`.
///
/// Returns `Ok(None)` when the block would be zero bytes (empty request or
/// zero-sized `T`); no memory is requested in that case.
pub(crate) fn allocate_cells<T>(capacity: usize) -> Result<Option<NonNull<T>>, StorageError> {
    let layout = layout_for::<T>(capacity)?;
    if layout.size() == 0 {
        return Ok(None);
    }
    // SAFETY: `layout` has non-zero size, checked above.
    let raw = unsafe { alloc::alloc(layout) };
    match NonNull::new(raw.cast::<T>()) {
        Some(ptr) => {
            log::trace!(
                "advec: allocated {} cells ({} bytes) at {:p}",
                capacity,
                layout.size(),
                ptr
            );
            Ok(Some(ptr))
        }
        None => Err(StorageError::AllocationFailed {
            bytes: layout.size(),
            align: layout.align(),
        }),
    }
}

/// Release a block previously returned by [`allocate_cells`].
///
/// # Safety
///
/// `ptr` must have come from `allocate_cells::<T>(capacity)` with the same
/// `capacity`, and must not be released twice.
pub(crate) unsafe fn release_cells<T>(ptr: NonNull<T>, capacity: usize) {
    // The layout was valid when the block was allocated, so it is valid now.
    let Ok(layout) = layout_for::<T>(capacity) else {
        return;
    };
    log::trace!("advec: releasing {} cells at {:p}", capacity, ptr);
    // SAFETY: caller guarantees `ptr` was allocated with exactly `layout`.
    unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
}
