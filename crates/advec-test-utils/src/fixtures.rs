//! Lifecycle-tracking element fixtures.
//!
//! - [`Tracker`]: shared counters plus deterministic failure injection.
//! - [`Tracked`]: an element reporting to a tracker; [`Movable`] relocates,
//!   [`Rooted`] declares relocation fallible and so is duplicated on growth.
//! - [`Unduplicable`]: relocation declared fallible and no duplication.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use advec_core::{Element, ElementError};

/// Sentinel for "never fail".
const NEVER: usize = usize::MAX;

#[derive(Debug)]
struct TrackerState {
    constructed: AtomicUsize,
    duplicated: AtomicUsize,
    dropped: AtomicUsize,
    duplicate_calls: AtomicUsize,
    construct_calls: AtomicUsize,
    fail_duplicate_at: AtomicUsize,
    fail_construct_at: AtomicUsize,
}

/// Shared lifecycle counters for a family of tracked elements.
///
/// Cloning a tracker shares its counters. Uses atomics so fixtures stay
/// `Send + Sync`.
#[derive(Clone, Debug)]
pub struct Tracker {
    state: Arc<TrackerState>,
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(TrackerState {
                constructed: AtomicUsize::new(0),
                duplicated: AtomicUsize::new(0),
                dropped: AtomicUsize::new(0),
                duplicate_calls: AtomicUsize::new(0),
                construct_calls: AtomicUsize::new(0),
                fail_duplicate_at: AtomicUsize::new(NEVER),
                fail_construct_at: AtomicUsize::new(NEVER),
            }),
        }
    }

    /// Build a tracked value directly. Never fails.
    pub fn make<const RELOCATES: bool>(&self, value: i64) -> Tracked<RELOCATES> {
        self.state.constructed.fetch_add(1, Ordering::SeqCst);
        Tracked {
            value,
            tracker: self.clone(),
        }
    }

    pub fn movable(&self, value: i64) -> Movable {
        self.make(value)
    }

    pub fn rooted(&self, value: i64) -> Rooted {
        self.make(value)
    }

    /// Build a tracked value through the failure-injecting constructor.
    ///
    /// Use inside an emplace closure to simulate a constructor that fails.
    pub fn try_make<const RELOCATES: bool>(
        &self,
        value: i64,
    ) -> Result<Tracked<RELOCATES>, ElementError> {
        let call = self.state.construct_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.state.fail_construct_at.load(Ordering::SeqCst) {
            return Err(ElementError::ConstructionFailed {
                reason: format!("injected failure on construction #{call}"),
            });
        }
        Ok(self.make(value))
    }

    /// Make the `nth` duplicate from now fail (1-based).
    pub fn fail_duplicate_on(&self, nth: usize) {
        let base = self.state.duplicate_calls.load(Ordering::SeqCst);
        self.state
            .fail_duplicate_at
            .store(base + nth, Ordering::SeqCst);
    }

    /// Make the `nth` [`try_make`](Self::try_make) from now fail (1-based).
    pub fn fail_construction_on(&self, nth: usize) {
        let base = self.state.construct_calls.load(Ordering::SeqCst);
        self.state
            .fail_construct_at
            .store(base + nth, Ordering::SeqCst);
    }

    /// Disarm all pending failures.
    pub fn clear_failures(&self) {
        self.state.fail_duplicate_at.store(NEVER, Ordering::SeqCst);
        self.state.fail_construct_at.store(NEVER, Ordering::SeqCst);
    }

    /// Successful constructions, duplicates included.
    pub fn constructions(&self) -> usize {
        self.state.constructed.load(Ordering::SeqCst)
    }

    /// Successful duplicates.
    pub fn duplicates(&self) -> usize {
        self.state.duplicated.load(Ordering::SeqCst)
    }

    pub fn drops(&self) -> usize {
        self.state.dropped.load(Ordering::SeqCst)
    }

    /// Values constructed and not yet dropped.
    pub fn live(&self) -> usize {
        self.constructions() - self.drops()
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

/// An `i64` that reports its lifecycle to a [`Tracker`].
///
/// `RELOCATES` becomes [`Element::RELOCATION_IS_INFALLIBLE`].
pub struct Tracked<const RELOCATES: bool> {
    value: i64,
    tracker: Tracker,
}

/// Tracked element that is relocated bitwise on growth.
pub type Movable = Tracked<true>;

/// Tracked element that is duplicated on growth.
pub type Rooted = Tracked<false>;

impl<const RELOCATES: bool> Tracked<RELOCATES> {
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn set(&mut self, value: i64) {
        self.value = value;
    }
}

impl<const RELOCATES: bool> Element for Tracked<RELOCATES> {
    const RELOCATION_IS_INFALLIBLE: bool = RELOCATES;

    fn duplicate(&self) -> Result<Self, ElementError> {
        let state = &self.tracker.state;
        let call = state.duplicate_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == state.fail_duplicate_at.load(Ordering::SeqCst) {
            return Err(ElementError::DuplicateFailed {
                reason: format!("injected failure on duplicate #{call}"),
            });
        }
        state.duplicated.fetch_add(1, Ordering::SeqCst);
        Ok(self.tracker.make(self.value))
    }
}

impl<const RELOCATES: bool> Drop for Tracked<RELOCATES> {
    fn drop(&mut self) {
        self.tracker.state.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

impl<const RELOCATES: bool> PartialEq for Tracked<RELOCATES> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<const RELOCATES: bool> PartialEq<i64> for Tracked<RELOCATES> {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl<const RELOCATES: bool> fmt::Debug for Tracked<RELOCATES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// A value that can be neither duplicated nor safely relocated.
///
/// The container has no safety net for it and must fall back to
/// relocation.
#[derive(Debug, PartialEq, Eq)]
pub struct Unduplicable(pub i64);

impl Element for Unduplicable {
    const RELOCATION_IS_INFALLIBLE: bool = false;
    const DUPLICABLE: bool = false;

    fn duplicate(&self) -> Result<Self, ElementError> {
        Err(ElementError::NotDuplicable {
            type_name: std::any::type_name::<Self>(),
        })
    }
}
