//! Iteration over a [`GrowableArray`] and collection into one.
//!
//! Borrowing iteration is plain slice iteration (`&array` and `&mut array`
//! yield `std::slice::Iter` / `IterMut`). Both are invalidated by any
//! operation that reallocates or shifts, which the borrow checker enforces.
//! [`IntoIter`] consumes the array and owns its block.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use advec_core::{ArrayError, Element};
use advec_raw::RawStorage;

use crate::array::GrowableArray;

/// Owning iterator over the elements of a [`GrowableArray`].
///
/// Cells `[front, back)` of `storage` are live; everything else has been
/// yielded or was never initialized.
pub struct IntoIter<T> {
    storage: RawStorage<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: cells [front, back) are live and inside the block.
        unsafe {
            slice::from_raw_parts(
                self.storage.as_ptr().add(self.front),
                self.back - self.front,
            )
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        // SAFETY: `index` was in the live range and has just left it.
        Some(unsafe { self.storage.slot(index).assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: `back` was in the live range and has just left it.
        Some(unsafe { self.storage.slot(self.back).assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.back - self.front;
        // SAFETY: cells [front, back) are live. The range is emptied first
        // so a panicking destructor cannot cause a second drop.
        unsafe {
            let rest =
                ptr::slice_from_raw_parts_mut(self.storage.as_mut_ptr().add(self.front), remaining);
            self.front = self.back;
            ptr::drop_in_place(rest);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        // The array keeps no live elements and no block, so its own drop
        // is a no-op.
        let back = std::mem::replace(&mut self.len, 0);
        IntoIter {
            storage: self.storage.take(),
            front: 0,
            back,
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Element> GrowableArray<T> {
    /// Collect an iterator, growing by the doubling policy.
    ///
    /// Reserves the iterator's lower size bound up front.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut array = Self::new();
        array.reserve(iter.size_hint().0)?;
        for value in iter {
            array.push(value)?;
        }
        Ok(array)
    }

    /// Duplicate every element of `values` into a new array of exactly
    /// that capacity.
    pub fn from_slice(values: &[T]) -> Result<Self, ArrayError> {
        let mut array = Self::with_capacity(values.len())?;
        array.extend_from_slice(values)?;
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_iter_yields_in_order_from_both_ends() {
        let a = GrowableArray::from_slice(&[1, 2, 3, 4]).unwrap();
        let mut it = a.into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.as_slice(), &[2, 3]);
        assert_eq!(it.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn partially_consumed_into_iter_drops_rest() {
        let a = GrowableArray::from_slice(&["a".to_string(), "b".to_string(), "c".to_string()])
            .unwrap();
        let mut it = a.into_iter();
        assert_eq!(it.next().as_deref(), Some("a"));
        drop(it);
    }

    #[test]
    fn borrowed_iteration_is_restartable() {
        let mut a = GrowableArray::from_slice(&[1, 2, 3]).unwrap();
        for v in &mut a {
            *v *= 2;
        }
        let first: Vec<_> = (&a).into_iter().copied().collect();
        let second: Vec<_> = a.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![2, 4, 6]);
    }

    #[test]
    fn try_from_iter_collects() {
        let a = GrowableArray::try_from_iter((0..5).map(|i| i * i)).unwrap();
        assert_eq!(a, [0, 1, 4, 9, 16]);
        assert_eq!(a.capacity(), 5);
    }

    #[test]
    fn from_slice_is_exact() {
        let a = GrowableArray::from_slice(&[1u8, 2, 3]).unwrap();
        assert_eq!(a.capacity(), 3);
        assert_eq!(a.len(), 3);
    }
}
