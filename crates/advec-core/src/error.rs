//! Error types for the advec workspace.
//!
//! Organized by the layer that raises them: storage (allocation and
//! capacity limits), element (construction and duplication of stored
//! values), and configuration. [`ArrayError`] is the union returned by
//! every fallible `GrowableArray` operation.

use std::error::Error;
use std::fmt;

/// Errors from acquiring a raw storage block.
///
/// Raised before any element is touched, so a caller that receives one
/// can rely on the container being exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The requested element count does not fit in a valid layout
    /// (byte size overflows `isize::MAX`).
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
    },
    /// The global allocator returned no memory for the block.
    AllocationFailed {
        /// Size of the refused block in bytes.
        bytes: usize,
        /// Alignment of the refused block in bytes.
        align: usize,
    },
    /// The request exceeds the container's configured ceiling.
    CapacityExceeded {
        /// Number of elements requested.
        requested: usize,
        /// The configured `max_capacity`.
        max_capacity: usize,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements exceed the layout limit")
            }
            Self::AllocationFailed { bytes, align } => {
                write!(f, "allocation of {bytes} bytes (align {align}) failed")
            }
            Self::CapacityExceeded {
                requested,
                max_capacity,
            } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} elements, max capacity {max_capacity}"
                )
            }
        }
    }
}

impl Error for StorageError {}

/// Errors raised by a stored value's own construction or copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementError {
    /// A constructor closure passed to an emplace operation failed.
    ConstructionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// [`Element::duplicate`](crate::Element::duplicate) or
    /// [`Element::assign_from`](crate::Element::assign_from) failed.
    DuplicateFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The element type does not support duplication at all.
    NotDuplicable {
        /// `std::any::type_name` of the element type.
        type_name: &'static str,
    },
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstructionFailed { reason } => write!(f, "construction failed: {reason}"),
            Self::DuplicateFailed { reason } => write!(f, "duplicate failed: {reason}"),
            Self::NotDuplicable { type_name } => {
                write!(f, "type {type_name} cannot be duplicated")
            }
        }
    }
}

impl Error for ElementError {}

/// Errors detected by [`ArrayConfig::validate`](crate::ArrayConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_capacity` is zero, so no element could ever be stored.
    ZeroMaxCapacity,
    /// `initial_capacity` is larger than `max_capacity`.
    InitialCapacityExceedsMax {
        /// The configured initial capacity.
        initial: usize,
        /// The configured ceiling.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxCapacity => write!(f, "max_capacity must be at least 1"),
            Self::InitialCapacityExceedsMax { initial, max } => {
                write!(f, "initial_capacity {initial} exceeds max_capacity {max}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Any failure surfaced by a `GrowableArray` operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// Storage could not be acquired.
    Storage(StorageError),
    /// A stored value's construction or copy failed.
    Element(ElementError),
    /// The supplied configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage error: {e}"),
            Self::Element(e) => write!(f, "element error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Element(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<StorageError> for ArrayError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ElementError> for ArrayError {
    fn from(e: ElementError) -> Self {
        Self::Element(e)
    }
}

impl From<ConfigError> for ArrayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
