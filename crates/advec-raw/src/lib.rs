//! Raw, uninitialized storage blocks for advec.
//!
//! A [`RawStorage<T>`] owns a contiguous block sized for some number of
//! `T` cells and knows nothing about which of them hold live values. It
//! allocates, addresses, swaps and releases; constructing and destroying
//! elements is the responsibility of the layer above (`advec-array`).
//!
//! # Architecture
//!
//! ```text
//! RawStorage<T>
//! ├── alloc   (layout computation, global allocator calls)
//! └── storage (ownership, addressing, swap/take)
//! ```
//!
//! # Safety
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `advec-array`). Unsafe code is confined to the `alloc` and `storage`
//! modules, each block carrying a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod alloc;
pub mod storage;

pub use advec_core::StorageError;
pub use storage::RawStorage;
