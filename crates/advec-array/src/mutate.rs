//! Append, emplace, insert, remove and resize.

#![allow(unsafe_code)]

use std::ptr;

use advec_core::{ArrayError, Element, ElementError};

use crate::array::GrowableArray;

impl<T> GrowableArray<T> {
    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: cell `len` was live and is no longer counted, so it is
        // read out exactly once.
        Some(unsafe { self.storage.slot(self.len).assume_init_read() })
    }

    /// Remove and return the element at `index`, shifting the tail down.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "remove index {index} out of range (len {})",
            self.len
        );
        // SAFETY: index < len, so the cell is live. The tail
        // [index + 1, len) moves one cell toward the front (overlap-safe
        // `copy`), after which the last cell is no longer counted.
        unsafe {
            let hole = self.storage.as_mut_ptr().add(index);
            let value = ptr::read(hole);
            ptr::copy(hole.add(1), hole, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Drop the element at `index`, shifting the tail down.
    ///
    /// Returns `index`, which now refers to the element that followed the
    /// erased one (or to the end). The length is already reduced when the
    /// erased value's destructor runs.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Drop every element past `len`. No-op if `len >= self.len()`.
    ///
    /// Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let excess = self.len - len;
        // SAFETY: cells [len, self.len) are live. The length is reduced
        // first so a panicking destructor cannot cause a second drop.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.storage.as_mut_ptr().add(len), excess);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Construct values from `make` into the spare cells until the array
    /// holds `new_len` elements.
    ///
    /// Capacity must already be at least `new_len`. On failure the
    /// elements built by this call are dropped and the error returned.
    pub(crate) fn construct_tail<F>(
        &mut self,
        new_len: usize,
        mut make: F,
    ) -> Result<(), ElementError>
    where
        F: FnMut() -> Result<T, ElementError>,
    {
        debug_assert!(new_len <= self.capacity());
        let original = self.len;
        while self.len < new_len {
            match make() {
                Ok(value) => {
                    self.storage.slot_mut(self.len).write(value);
                    self.len += 1;
                }
                Err(e) => {
                    self.truncate(original);
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

impl<T: Element> GrowableArray<T> {
    /// Append `value`, growing if full.
    ///
    /// If growth fails the array is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<&mut T, ArrayError> {
        self.emplace_back_with(|| Ok(value))
    }

    /// Append a duplicate of `value`.
    ///
    /// If the duplicate fails, the array is unchanged even when a
    /// reallocation was under way.
    pub fn push_copy(&mut self, value: &T) -> Result<&mut T, ArrayError> {
        self.emplace_back_with(|| value.duplicate())
    }

    /// Construct a value with `make` directly at the end.
    pub fn emplace_back_with<F>(&mut self, make: F) -> Result<&mut T, ArrayError>
    where
        F: FnOnce() -> Result<T, ElementError>,
    {
        let index = self.len;
        self.emplace_with(index, make)
    }

    /// Construct a value with `make` at `index`, shifting the tail up.
    ///
    /// `index == len` appends. When the array is full the value is built in
    /// the new block before anything moves; otherwise it is built before any
    /// cell is shifted. Either way a failing `make` leaves the array
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace_with<F>(&mut self, index: usize, make: F) -> Result<&mut T, ArrayError>
    where
        F: FnOnce() -> Result<T, ElementError>,
    {
        assert!(
            index <= self.len,
            "insertion index {index} out of range (len {})",
            self.len
        );
        if self.len == self.capacity() {
            return self.grow_and_emplace(index, make);
        }

        let value = make()?;
        // SAFETY: len < capacity, so cell `len` is spare. Cells
        // [index, len) shift one toward the end (overlap-safe `copy`,
        // effectively back-to-front), then the vacated cell takes `value`.
        // Nothing between the shift and the write can fail.
        unsafe {
            let slot = self.storage.as_mut_ptr().add(index);
            if index < self.len {
                ptr::copy(slot, slot.add(1), self.len - index);
            }
            ptr::write(slot, value);
        }
        self.len += 1;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Insert `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T, ArrayError> {
        self.emplace_with(index, || Ok(value))
    }

    /// Insert a duplicate of `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_copy(&mut self, index: usize, value: &T) -> Result<&mut T, ArrayError> {
        self.emplace_with(index, || value.duplicate())
    }

    /// Resize to `new_len`, filling new cells with `T::default()`.
    ///
    /// Shrinking drops the excess and keeps capacity. Growing reserves
    /// exactly `new_len` if needed.
    pub fn resize(&mut self, new_len: usize) -> Result<(), ArrayError>
    where
        T: Default,
    {
        self.resize_with(new_len, || Ok(T::default()))
    }

    /// Resize to `new_len`, filling new cells from `make`.
    ///
    /// If `make` fails, every element it produced is dropped and the length
    /// is restored; any reservation made stays in place.
    pub fn resize_with<F>(&mut self, new_len: usize, make: F) -> Result<(), ArrayError>
    where
        F: FnMut() -> Result<T, ElementError>,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.reserve(new_len)?;
        self.construct_tail(new_len, make)?;
        Ok(())
    }

    /// Append duplicates of every element of `values`.
    ///
    /// Grows by the doubling policy. On failure the appended prefix is
    /// dropped and the length restored.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), ArrayError> {
        self.reserve_additional(values.len())?;
        let mut source = values.iter();
        let new_len = self.len + values.len();
        self.construct_tail(new_len, || match source.next() {
            Some(value) => value.duplicate(),
            None => Err(ElementError::ConstructionFailed {
                reason: "source exhausted".into(),
            }),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_values(values: &[i32]) -> GrowableArray<i32> {
        let mut a = GrowableArray::new();
        a.extend_from_slice(values).unwrap();
        a
    }

    fn failing() -> Result<i32, ElementError> {
        Err(ElementError::ConstructionFailed {
            reason: "refused".into(),
        })
    }

    #[test]
    fn push_doubles_capacity() {
        let mut a = GrowableArray::new();
        let mut seen = Vec::new();
        for i in 0..9 {
            a.push(i).unwrap();
            seen.push(a.capacity());
        }
        assert_eq!(seen, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn push_returns_reference_to_new_element() {
        let mut a = GrowableArray::new();
        *a.push(1).unwrap() += 10;
        assert_eq!(a, [11]);
    }

    #[test]
    fn pop_returns_last() {
        let mut a = from_values(&[1, 2]);
        assert_eq!(a.pop(), Some(2));
        assert_eq!(a.pop(), Some(1));
        assert_eq!(a.pop(), None);
        assert_eq!(a.capacity(), 2);
    }

    #[test]
    fn insert_interior_without_growth() {
        let mut a = GrowableArray::with_capacity(8).unwrap();
        a.extend_from_slice(&[1, 2, 3]).unwrap();
        let ptr = a.as_ptr();
        assert_eq!(*a.insert(1, 99).unwrap(), 99);
        assert_eq!(a, [1, 99, 2, 3]);
        assert_eq!(a.as_ptr(), ptr);
    }

    #[test]
    fn insert_interior_with_growth() {
        let mut a = from_values(&[1, 2, 3, 4]);
        assert_eq!(a.capacity(), 4);
        a.insert(2, 99).unwrap();
        assert_eq!(a, [1, 2, 99, 3, 4]);
        assert_eq!(a.capacity(), 8);
    }

    #[test]
    fn insert_at_front_and_end() {
        let mut a = from_values(&[2]);
        a.insert(0, 1).unwrap();
        a.insert(2, 3).unwrap();
        assert_eq!(a, [1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "insertion index 2 out of range")]
    fn insert_past_end_panics() {
        let mut a = from_values(&[1]);
        let _ = a.insert(2, 5);
    }

    #[test]
    fn failing_constructor_leaves_array_unchanged_when_full() {
        let mut a = from_values(&[1, 2]);
        assert_eq!(a.capacity(), 2);
        let err = a.emplace_with(1, failing).unwrap_err();
        assert!(matches!(err, ArrayError::Element(_)));
        assert_eq!(a, [1, 2]);
        assert_eq!(a.capacity(), 2);
    }

    #[test]
    fn failing_constructor_leaves_array_unchanged_with_room() {
        let mut a = GrowableArray::with_capacity(4).unwrap();
        a.extend_from_slice(&[1, 2]).unwrap();
        assert!(a.emplace_with(0, failing).is_err());
        assert_eq!(a, [1, 2]);
    }

    #[test]
    fn remove_shifts_tail() {
        let mut a = from_values(&[1, 2, 3, 4]);
        assert_eq!(a.remove(1), 2);
        assert_eq!(a, [1, 3, 4]);
        assert_eq!(a.remove(2), 4);
        assert_eq!(a, [1, 3]);
    }

    #[test]
    fn erase_returns_following_position() {
        let mut a = from_values(&[5, 6, 7]);
        let next = a.erase(0);
        assert_eq!(next, 0);
        assert_eq!(a[next], 6);
    }

    #[test]
    #[should_panic(expected = "remove index 0 out of range (len 0)")]
    fn erase_on_empty_panics() {
        let mut a = GrowableArray::<i32>::new();
        a.erase(0);
    }

    #[test]
    fn resize_grows_with_defaults_and_shrinks() {
        let mut a = from_values(&[99, 2, 3]);
        a.resize(5).unwrap();
        assert_eq!(a, [99, 2, 3, 0, 0]);
        assert_eq!(a.capacity(), 5);
        a.resize(1).unwrap();
        assert_eq!(a, [99]);
        assert_eq!(a.capacity(), 5);
    }

    #[test]
    fn resize_with_failure_restores_len() {
        let mut a = from_values(&[1]);
        let mut calls = 0;
        let err = a
            .resize_with(6, || {
                calls += 1;
                if calls == 3 {
                    failing()
                } else {
                    Ok(7)
                }
            })
            .unwrap_err();
        assert!(matches!(err, ArrayError::Element(_)));
        assert_eq!(a, [1]);
        assert_eq!(a.capacity(), 6);
    }

    #[test]
    fn truncate_and_clear_keep_capacity() {
        let mut a = from_values(&[1, 2, 3]);
        a.truncate(5);
        assert_eq!(a.len(), 3);
        a.truncate(1);
        assert_eq!(a, [1]);
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 3);
    }

    #[test]
    fn extend_from_slice_uses_doubling() {
        let mut a = from_values(&[1, 2, 3]);
        a.extend_from_slice(&[4]).unwrap();
        assert_eq!(a.capacity(), 6);
        assert_eq!(a, [1, 2, 3, 4]);
    }

    #[test]
    fn zero_sized_elements() {
        let mut a = GrowableArray::new();
        for _ in 0..10 {
            a.push(()).unwrap();
        }
        a.insert(3, ()).unwrap();
        assert_eq!(a.len(), 11);
        a.remove(0);
        assert_eq!(a.len(), 10);
    }
}
