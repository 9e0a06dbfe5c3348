//! Drop guard for a replacement block under construction.
//!
//! During reallocation the new block is filled out of order: the inserted
//! value first, then the prefix, then the suffix. [`StagedBlock`] records
//! which cell ranges hold constructed values so that an early return or a
//! panic destroys exactly those cells and nothing else. Once the block is
//! complete, [`StagedBlock::into_storage`] disarms the guard.

#![allow(unsafe_code)]

use std::ops::Range;
use std::ptr;

use advec_raw::RawStorage;
use smallvec::SmallVec;

/// A raw block plus the ranges of cells constructed in it so far.
pub(crate) struct StagedBlock<T> {
    storage: RawStorage<T>,
    /// Constructed cell ranges. Inserted value, prefix, suffix: three at most.
    live: SmallVec<[Range<usize>; 3]>,
}

impl<T> StagedBlock<T> {
    pub(crate) fn new(storage: RawStorage<T>) -> Self {
        Self {
            storage,
            live: SmallVec::new(),
        }
    }

    /// Construct `value` in cell `index` and record it.
    ///
    /// The cell must not already hold a recorded value.
    pub(crate) fn write(&mut self, index: usize, value: T) {
        self.storage.slot_mut(index).write(value);
        self.mark(index..index + 1);
    }

    fn mark(&mut self, cells: Range<usize>) {
        if cells.is_empty() {
            return;
        }
        if let Some(last) = self.live.last_mut() {
            if last.end == cells.start {
                last.end = cells.end;
                return;
            }
        }
        self.live.push(cells);
    }

    /// Base of the block, for bulk relocation. Cells filled this way are
    /// not recorded and must be handed off via `into_storage` before
    /// anything can fail.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Number of cells currently recorded as constructed.
    pub(crate) fn constructed(&self) -> usize {
        self.live.iter().map(|r| r.len()).sum()
    }

    /// Disarm the guard and hand back the block.
    ///
    /// Ownership of every recorded value passes to the caller.
    pub(crate) fn into_storage(mut self) -> RawStorage<T> {
        self.live.clear();
        self.storage.take()
    }
}

impl<T> Drop for StagedBlock<T> {
    fn drop(&mut self) {
        let base = self.storage.as_mut_ptr();
        for cells in self.live.drain(..) {
            // SAFETY: every recorded range lies inside the block and holds
            // values constructed by `write`, each recorded once.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    base.add(cells.start),
                    cells.len(),
                ));
            }
        }
    }
}
