//! Capacity policy and reallocation.
//!
//! Every reallocation follows the same order: allocate the new block
//! (nothing has changed if this fails), construct any new value in it,
//! transfer the live elements, then swap the blocks. The transfer either
//! relocates bitwise or duplicates, per [`TransferStrategy::of`].

#![allow(unsafe_code)]

use std::mem;
use std::ptr;

use advec_core::{ArrayError, Element, ElementError, StorageError, TransferStrategy};
use advec_raw::RawStorage;

use crate::array::GrowableArray;
use crate::staged::StagedBlock;

/// Capacity to grow to when `required` cells are needed and `current`
/// are available.
///
/// Doubles (starting from 1), clamped to `max_capacity`.
pub(crate) fn grown_capacity(
    current: usize,
    required: usize,
    max_capacity: usize,
) -> Result<usize, StorageError> {
    if required > max_capacity {
        return Err(StorageError::CapacityExceeded {
            requested: required,
            max_capacity,
        });
    }
    let doubled = current.saturating_mul(2).max(1);
    Ok(doubled.max(required).min(max_capacity))
}

impl<T: Element> GrowableArray<T> {
    /// Raise capacity to at least `capacity`. No-op if already there.
    ///
    /// Length and values are unchanged. On failure the array is exactly as
    /// it was.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ArrayError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        if capacity > self.max_capacity {
            return Err(StorageError::CapacityExceeded {
                requested: capacity,
                max_capacity: self.max_capacity,
            }
            .into());
        }
        let staged = StagedBlock::new(RawStorage::allocate(capacity)?);
        let len = self.len;
        self.transfer_and_adopt(staged, len, 0)?;
        Ok(())
    }

    /// Grow by the doubling policy so that `additional` more elements fit.
    pub(crate) fn reserve_additional(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(StorageError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        if required <= self.capacity() {
            return Ok(());
        }
        let capacity = grown_capacity(self.capacity(), required, self.max_capacity)?;
        self.reserve(capacity)
    }

    /// Reallocate into a grown block with `make()`'s value at `index`.
    ///
    /// The value is built in the new block before any live element moves;
    /// if it fails, the new block is discarded and `self` is unchanged.
    pub(crate) fn grow_and_emplace<F>(
        &mut self,
        index: usize,
        make: F,
    ) -> Result<&mut T, ArrayError>
    where
        F: FnOnce() -> Result<T, ElementError>,
    {
        let capacity = grown_capacity(self.capacity(), self.len + 1, self.max_capacity)?;
        let mut staged = StagedBlock::new(RawStorage::allocate(capacity)?);
        staged.write(index, make()?);
        self.transfer_and_adopt(staged, index, 1)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Move the live range into `staged`, leaving `gap_len` cells at `gap_at`
    /// for values the caller has already written, then swap the blocks.
    ///
    /// With [`TransferStrategy::Duplicate`] a failing duplicate drops
    /// everything built in `staged` and returns before `self` is touched.
    fn transfer_and_adopt(
        &mut self,
        mut staged: StagedBlock<T>,
        gap_at: usize,
        gap_len: usize,
    ) -> Result<(), ElementError> {
        let len = self.len;
        debug_assert!(gap_at <= len);
        debug_assert_eq!(staged.constructed(), gap_len);
        let strategy = TransferStrategy::of::<T>();

        match strategy {
            TransferStrategy::Relocate => {
                let src = self.storage.as_ptr();
                let dst = staged.as_mut_ptr();
                // SAFETY: source cells [0, len) are live; destination cells
                // [0, gap_at) and [gap_at + gap_len, len + gap_len) are
                // uninitialized and inside the new block, which is at least
                // len + gap_len long. The blocks are distinct allocations.
                // From here until the swap below nothing can fail, so the
                // moved-from originals are never dropped.
                unsafe {
                    ptr::copy_nonoverlapping(src, dst, gap_at);
                    ptr::copy_nonoverlapping(
                        src.add(gap_at),
                        dst.add(gap_at + gap_len),
                        len - gap_at,
                    );
                }
            }
            TransferStrategy::Duplicate => {
                let live = self.as_slice();
                for (i, value) in live[..gap_at].iter().enumerate() {
                    staged.write(i, value.duplicate()?);
                }
                for (i, value) in live[gap_at..].iter().enumerate() {
                    staged.write(gap_at + gap_len + i, value.duplicate()?);
                }
                debug_assert_eq!(staged.constructed(), len + gap_len);
            }
        }

        let mut block = staged.into_storage();
        log::debug!(
            "advec: reallocated {} -> {} cells ({:?}, {} live)",
            self.capacity(),
            block.capacity(),
            strategy,
            len
        );
        self.storage.swap(&mut block);
        let old_len = mem::replace(&mut self.len, len + gap_len);

        if strategy == TransferStrategy::Duplicate {
            // SAFETY: `block` is now the old storage and still holds the
            // `old_len` originals, which nothing else owns.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(block.as_mut_ptr(), old_len));
            }
        }
        Ok(())
    }
}
