//! advec: a growable array whose growth never corrupts it.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the advec sub-crates. For most users, adding `advec` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use advec::prelude::*;
//!
//! // A type that must be duplicated, not relocated, when the array grows.
//! #[derive(Debug, PartialEq)]
//! struct Ticket(u32);
//!
//! impl Element for Ticket {
//!     const RELOCATION_IS_INFALLIBLE: bool = false;
//!
//!     fn duplicate(&self) -> Result<Self, ElementError> {
//!         if self.0 == 13 {
//!             return Err(ElementError::DuplicateFailed {
//!                 reason: "unlucky".into(),
//!             });
//!         }
//!         Ok(Ticket(self.0))
//!     }
//! }
//!
//! let mut tickets = GrowableArray::with_capacity(2).unwrap();
//! tickets.push(Ticket(13)).unwrap();
//! tickets.push(Ticket(7)).unwrap();
//!
//! // Growing would duplicate ticket 13, which fails: nothing changes.
//! assert!(tickets.push(Ticket(1)).is_err());
//! assert_eq!(tickets.len(), 2);
//! assert_eq!(tickets.capacity(), 2);
//! assert_eq!(tickets[0], Ticket(13));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `advec-core` | `Element` capability trait, errors, `ArrayConfig` |
//! | [`raw`] | `advec-raw` | `RawStorage`, the uninitialized typed block |
//! | [`array`] | `advec-array` | `GrowableArray` and its iterators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Element capabilities, errors and configuration (`advec-core`).
///
/// Implement [`types::Element`] for your own types, or use
/// [`impl_element_via_clone!`](types::impl_element_via_clone) for `Clone`
/// types.
pub use advec_core as types;

/// Uninitialized typed storage (`advec-raw`).
///
/// [`raw::RawStorage`] owns a block sized in elements and never constructs
/// or drops one.
pub use advec_raw as raw;

/// The growable array (`advec-array`).
///
/// [`array::GrowableArray`] and its owning iterator [`array::IntoIter`].
pub use advec_array as array;

/// Common imports for typical advec usage.
///
/// ```rust
/// use advec::prelude::*;
/// ```
pub mod prelude {
    pub use advec_array::GrowableArray;
    pub use advec_core::{
        ArrayConfig, ArrayError, ConfigError, Element, ElementError, StorageError,
        TransferStrategy,
    };
}
