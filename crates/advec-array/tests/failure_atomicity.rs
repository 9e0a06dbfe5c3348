//! Integration test: failures during growth leave the array untouched.
//!
//! Each test arms a [`Tracker`] to fail on a chosen duplicate or
//! construction, triggers an operation that reallocates, and checks that
//! length, capacity and values are as before and that nothing leaked.

use advec_array::{ArrayError, ElementError, GrowableArray};
use advec_core::StorageError;
use advec_test_utils::{Rooted, Tracked, Tracker};

fn values<const R: bool>(array: &GrowableArray<Tracked<R>>) -> Vec<i64> {
    array.iter().map(|v| v.value()).collect()
}

fn full_rooted(tracker: &Tracker, n: i64) -> GrowableArray<Rooted> {
    let mut array = GrowableArray::with_capacity(n as usize).unwrap();
    for i in 0..n {
        array.push(tracker.rooted(i)).unwrap();
    }
    assert_eq!(array.len(), array.capacity());
    array
}

#[test]
fn push_fails_on_kth_transfer_duplicate() {
    let tracker = Tracker::new();
    let mut array = full_rooted(&tracker, 4);
    let before = tracker.live();

    tracker.fail_duplicate_on(3);
    let err = array.push(tracker.rooted(99)).unwrap_err();
    assert!(matches!(
        err,
        ArrayError::Element(ElementError::DuplicateFailed { .. })
    ));

    assert_eq!(array.len(), 4);
    assert_eq!(array.capacity(), 4);
    assert_eq!(values(&array), vec![0, 1, 2, 3]);
    // The pushed value and the two finished duplicates were dropped.
    assert_eq!(tracker.live(), before);
}

#[test]
fn push_copy_fails_on_the_new_value() {
    let tracker = Tracker::new();
    let mut array = full_rooted(&tracker, 3);
    let extra = tracker.rooted(7);
    let before = tracker.live();

    tracker.fail_duplicate_on(1);
    assert!(array.push_copy(&extra).is_err());
    assert_eq!(values(&array), vec![0, 1, 2]);
    assert_eq!(array.capacity(), 3);
    assert_eq!(tracker.live(), before);
}

#[test]
fn every_failure_point_during_insert_is_atomic() {
    for k in 1..=5 {
        let tracker = Tracker::new();
        let mut array = full_rooted(&tracker, 5);
        let before = tracker.live();

        tracker.fail_duplicate_on(k);
        assert!(array.insert(2, tracker.rooted(42)).is_err(), "k = {k}");
        assert_eq!(values(&array), vec![0, 1, 2, 3, 4], "k = {k}");
        assert_eq!(array.capacity(), 5, "k = {k}");
        assert_eq!(tracker.live(), before, "k = {k}");

        tracker.clear_failures();
        array.insert(2, tracker.rooted(42)).unwrap();
        assert_eq!(values(&array), vec![0, 1, 42, 2, 3, 4]);
        drop(array);
        assert_eq!(tracker.live(), 0);
    }
}

#[test]
fn failing_constructor_without_growth_leaves_array_unchanged() {
    let tracker = Tracker::new();
    let mut array = GrowableArray::<Rooted>::with_capacity(8).unwrap();
    for i in 0..4 {
        array.push(tracker.rooted(i)).unwrap();
    }

    tracker.fail_construction_on(1);
    let err = array
        .emplace_with(1, || tracker.try_make(50))
        .unwrap_err();
    assert!(matches!(
        err,
        ArrayError::Element(ElementError::ConstructionFailed { .. })
    ));
    assert_eq!(values(&array), vec![0, 1, 2, 3]);
    assert_eq!(tracker.constructions(), tracker.drops() + 4);
}

#[test]
fn failing_constructor_with_growth_leaves_array_unchanged() {
    let tracker = Tracker::new();
    let mut array = full_rooted(&tracker, 2);
    let duplicates = tracker.duplicates();

    tracker.fail_construction_on(1);
    assert!(array.emplace_back_with(|| tracker.try_make(9)).is_err());
    assert_eq!(values(&array), vec![0, 1]);
    assert_eq!(array.capacity(), 2);
    // The value is built before any element is transferred.
    assert_eq!(tracker.duplicates(), duplicates);
}

#[test]
fn reserve_failure_keeps_block() {
    let tracker = Tracker::new();
    let mut array = full_rooted(&tracker, 3);
    let ptr = array.as_ptr();

    tracker.fail_duplicate_on(2);
    assert!(array.reserve(16).is_err());
    assert_eq!(array.as_ptr(), ptr);
    assert_eq!(array.capacity(), 3);
    assert_eq!(values(&array), vec![0, 1, 2]);
    assert_eq!(tracker.live(), 3);
}

#[test]
fn try_clone_failure_leaks_nothing() {
    let tracker = Tracker::new();
    let array = full_rooted(&tracker, 4);

    tracker.fail_duplicate_on(4);
    assert!(array.try_clone().is_err());
    assert_eq!(tracker.live(), 4);
    assert_eq!(values(&array), vec![0, 1, 2, 3]);
}

#[test]
fn assign_from_into_smaller_block_is_atomic() {
    let tracker = Tracker::new();
    let source = full_rooted(&tracker, 6);
    let mut target = full_rooted(&tracker, 2);
    let before = tracker.live();

    tracker.fail_duplicate_on(5);
    assert!(target.assign_from(&source).is_err());
    assert_eq!(values(&target), vec![0, 1]);
    assert_eq!(target.capacity(), 2);
    assert_eq!(tracker.live(), before);
}

#[test]
fn extend_failure_rolls_back_len() {
    let tracker = Tracker::new();
    let mut array = full_rooted(&tracker, 2);
    let extra: Vec<Rooted> = (10..14).map(|i| tracker.rooted(i)).collect();
    let before = tracker.live();

    // Growth duplicates the two existing elements; the fourth duplicate
    // is the second appended value.
    tracker.fail_duplicate_on(4);
    assert!(array.extend_from_slice(&extra).is_err());
    assert_eq!(values(&array), vec![0, 1]);
    assert_eq!(tracker.live(), before);
    assert!(array.capacity() >= 6);
}

#[test]
fn ceiling_is_checked_before_anything_is_built() {
    let tracker = Tracker::new();
    let config = advec_array::ArrayConfig::new(2).with_max_capacity(2);
    let mut array = GrowableArray::<Rooted>::with_config(&config).unwrap();
    array.push(tracker.rooted(1)).unwrap();
    array.push(tracker.rooted(2)).unwrap();

    let err = array.emplace_back_with(|| tracker.try_make(3)).unwrap_err();
    assert_eq!(
        err,
        ArrayError::Storage(StorageError::CapacityExceeded {
            requested: 3,
            max_capacity: 2
        })
    );
    assert_eq!(tracker.constructions(), 2);
    assert_eq!(values(&array), vec![1, 2]);
}
