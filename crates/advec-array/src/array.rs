//! The [`GrowableArray`] type: construction, queries, assignment and drop.

#![allow(unsafe_code)]

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::{self, SliceIndex};

use advec_core::{ArrayConfig, ArrayError, Element, ElementError, StorageError};
use advec_raw::RawStorage;

use crate::staged::StagedBlock;

/// A contiguous growable array of `T`.
///
/// Operations that may have to grow storage require `T: Element`, because
/// the element type decides whether live values are relocated or
/// duplicated into the new block (see
/// [`TransferStrategy`](advec_core::TransferStrategy)). Everything else
/// works for any `T`.
pub struct GrowableArray<T> {
    pub(crate) storage: RawStorage<T>,
    /// Number of live elements at the front of `storage`.
    pub(crate) len: usize,
    pub(crate) max_capacity: usize,
}

impl<T> GrowableArray<T> {
    /// An empty array. Allocates nothing.
    pub const fn new() -> Self {
        Self {
            storage: RawStorage::new(),
            len: 0,
            max_capacity: ArrayConfig::DEFAULT_MAX_CAPACITY,
        }
    }

    /// An empty array built from `config`.
    ///
    /// Validates the config, then allocates `config.initial_capacity`
    /// cells.
    pub fn with_config(config: &ArrayConfig) -> Result<Self, ArrayError> {
        config.validate()?;
        Ok(Self {
            storage: RawStorage::allocate(config.initial_capacity)?,
            len: 0,
            max_capacity: config.max_capacity,
        })
    }

    /// An empty array with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::with_config(&ArrayConfig::new(capacity))
    }

    /// An array of `len` default-constructed elements, with capacity `len`.
    pub fn with_len(len: usize) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        let mut array = Self::with_capacity(len)?;
        array.construct_tail(len, || Ok(T::default()))?;
        Ok(array)
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of cells allocated, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The configured capacity ceiling.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Pointer to the first cell. Invalidated by any reallocation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Mutable pointer to the first cell. Invalidated by any reallocation.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: cells [0, len) are initialized and inside the block.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Exchange contents, storage and ceiling with `other`. Never fails.
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        std::mem::swap(&mut self.len, &mut other.len);
        std::mem::swap(&mut self.max_capacity, &mut other.max_capacity);
    }

    /// Move the contents out, leaving `self` empty with no storage.
    ///
    /// The source keeps its capacity ceiling and is immediately reusable.
    pub fn take(&mut self) -> Self {
        let mut taken = Self {
            storage: RawStorage::new(),
            len: 0,
            max_capacity: self.max_capacity,
        };
        self.swap(&mut taken);
        taken
    }

    /// Move-assign `source` into `self` in O(1).
    ///
    /// The previous contents of `self` are dropped.
    pub fn assign_move(&mut self, mut source: Self) {
        self.swap(&mut source);
    }
}

impl<T: Element> GrowableArray<T> {
    /// Deep-copy the array.
    ///
    /// The copy has capacity equal to `len` and the same ceiling. If any
    /// duplicate fails, the values already copied are dropped and the
    /// error returned; `self` is never touched.
    pub fn try_clone(&self) -> Result<Self, ArrayError> {
        let mut staged = StagedBlock::new(RawStorage::allocate(self.len)?);
        for (i, value) in self.iter().enumerate() {
            staged.write(i, value.duplicate()?);
        }
        Ok(Self {
            storage: staged.into_storage(),
            len: self.len,
            max_capacity: self.max_capacity,
        })
    }

    /// Copy-assign `source` into `self`.
    ///
    /// Reuses the existing block when `source` fits: overlapping elements
    /// are assigned in place with [`Element::assign_from`], then the tail is
    /// either duplicated into fresh cells or dropped. When it does not fit,
    /// a full copy is built and swapped in, which leaves `self` untouched
    /// on failure.
    ///
    /// A failure on the in-place path leaves `self` valid but possibly
    /// partially assigned.
    pub fn assign_from(&mut self, source: &Self) -> Result<(), ArrayError> {
        if source.len > self.capacity() {
            if source.len > self.max_capacity {
                return Err(StorageError::CapacityExceeded {
                    requested: source.len,
                    max_capacity: self.max_capacity,
                }
                .into());
            }
            let mut copy = source.try_clone()?;
            copy.max_capacity = self.max_capacity;
            self.swap(&mut copy);
            return Ok(());
        }

        let shared = self.len.min(source.len);
        for (dst, src) in self.as_mut_slice()[..shared]
            .iter_mut()
            .zip(&source.as_slice()[..shared])
        {
            dst.assign_from(src)?;
        }

        if self.len < source.len {
            let mut next = source.as_slice()[self.len..].iter();
            self.construct_tail(source.len, || match next.next() {
                Some(value) => value.duplicate(),
                None => Err(ElementError::ConstructionFailed {
                    reason: "source exhausted".into(),
                }),
            })?;
        } else {
            self.truncate(source.len);
        }
        Ok(())
    }
}

impl<T: Element> Element for GrowableArray<T> {
    // The block lives on the heap; moving the header never moves elements.
    const RELOCATION_IS_INFALLIBLE: bool = true;
    const DUPLICABLE: bool = T::DUPLICABLE;

    fn duplicate(&self) -> Result<Self, ElementError> {
        self.try_clone().map_err(|e| match e {
            ArrayError::Element(inner) => inner,
            other => ElementError::DuplicateFailed {
                reason: other.to_string(),
            },
        })
    }

    fn assign_from(&mut self, source: &Self) -> Result<(), ElementError> {
        GrowableArray::assign_from(self, source).map_err(|e| match e {
            ArrayError::Element(inner) => inner,
            other => ElementError::DuplicateFailed {
                reason: other.to_string(),
            },
        })
    }
}

impl<T> Drop for GrowableArray<T> {
    fn drop(&mut self) {
        // SAFETY: cells [0, len) are live and dropped exactly once here;
        // `storage` releases the block afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for GrowableArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowableArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowableArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for GrowableArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for GrowableArray<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for GrowableArray<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<GrowableArray<U>> for GrowableArray<T> {
    fn eq(&self, other: &GrowableArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for GrowableArray<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for GrowableArray<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for GrowableArray<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for GrowableArray<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for GrowableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
