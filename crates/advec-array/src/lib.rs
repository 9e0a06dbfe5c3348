//! A contiguous, growable, failure-atomic array.
//!
//! [`GrowableArray<T>`] owns one [`RawStorage<T>`](advec_raw::RawStorage)
//! and a live count. Cells `[0, len)` always hold constructed values and
//! cells `[len, capacity)` are always uninitialized; every operation
//! restores that split before it returns, including when a value's
//! constructor or [`Element::duplicate`](advec_core::Element::duplicate)
//! fails part-way.
//!
//! # Architecture
//!
//! ```text
//! GrowableArray<T>
//! ├── array   (construction, queries, copy/move assignment, drop)
//! ├── growth  (capacity policy, reallocation, reserve)
//! ├── staged  (drop guard for a partially built replacement block)
//! ├── mutate  (push / emplace / insert / remove / resize)
//! └── iter    (owning iteration, collection from iterators)
//! ```
//!
//! # Failure guarantees
//!
//! - Growth paths (append or insert into a full array, `reserve`,
//!   `try_clone`) are all-or-nothing: the replacement block is built
//!   completely before it is swapped in.
//! - Same-capacity inserts build the new value before touching any cell,
//!   then shift bitwise; they cannot fail after the value exists.
//! - Element-wise copy assignment ([`GrowableArray::assign_from`]) and
//!   `resize_with` leave a valid array with a consistent length.
//!
//! # Example
//!
//! ```
//! use advec_array::GrowableArray;
//!
//! let mut a = GrowableArray::new();
//! for v in [1, 2, 3] {
//!     a.push(v).unwrap();
//! }
//! a.insert(1, 99).unwrap();
//! assert_eq!(a, [1, 99, 2, 3]);
//! a.erase(0);
//! a.resize(5).unwrap();
//! assert_eq!(a, [99, 2, 3, 0, 0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
mod growth;
pub mod iter;
mod mutate;
mod staged;

pub use advec_core::{ArrayConfig, ArrayError, Element, ElementError, TransferStrategy};
pub use array::GrowableArray;
pub use iter::IntoIter;
