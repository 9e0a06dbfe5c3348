//! Array configuration parameters.

use crate::error::ConfigError;

/// Configuration for a `GrowableArray`.
///
/// Controls the capacity allocated up front and the ceiling growth may
/// never cross. Validated when the array is built from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Number of element cells allocated at construction.
    ///
    /// Default: 0 (nothing is allocated until the first insertion).
    pub initial_capacity: usize,

    /// Largest capacity the array may ever hold, in elements.
    ///
    /// Default: `usize::MAX`, i.e. bounded only by the layout limit of the
    /// element type. Doubling that would overshoot this value is clamped
    /// to it; requests beyond it fail with `StorageError::CapacityExceeded`.
    pub max_capacity: usize,
}

impl ArrayConfig {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

    /// Default capacity ceiling.
    pub const DEFAULT_MAX_CAPACITY: usize = usize::MAX;

    /// Create a config that pre-allocates `initial_capacity` cells.
    ///
    /// Uses the default ceiling.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
        }
    }

    /// Builder-style setter for [`max_capacity`](Self::max_capacity).
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Check the config for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_capacity == 0 {
            return Err(ConfigError::ZeroMaxCapacity);
        }
        if self.initial_capacity > self.max_capacity {
            return Err(ConfigError::InitialCapacityExceedsMax {
                initial: self.initial_capacity,
                max: self.max_capacity,
            });
        }
        Ok(())
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}
