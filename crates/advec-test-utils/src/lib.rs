//! Test utilities for advec development.
//!
//! Provides element types that report every construction, duplication and
//! drop to a shared [`Tracker`], and that can be told to fail on a chosen
//! call. They back the lifecycle-accounting and failure-atomicity tests
//! of the array crate.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Movable, Rooted, Tracked, Tracker, Unduplicable};
