//! The capability contract a stored type offers to the container.
//!
//! Rust moves are bitwise and cannot fail, and `Drop` covers destruction,
//! so the only capabilities the container has to ask about are
//! duplication (copy-construction and copy-assignment, both fallible) and
//! whether moving a value into a freshly allocated cell is acceptable for
//! the type. Both answers are associated consts, so the growth strategy is
//! chosen once per element type at compile time.

use crate::error::ElementError;

/// A value the container knows how to duplicate and relocate.
///
/// Implement this directly for types whose copy can fail, or use
/// [`impl_element_via_clone!`](crate::impl_element_via_clone) for plain
/// `Clone` types.
pub trait Element: Sized {
    /// `true` if a value may be moved into a new storage cell with no
    /// possibility of failure.
    ///
    /// Set to `false` for types whose identity is bound to the cell they
    /// were created in and must be re-created, not moved, when storage is
    /// reallocated. The container then duplicates on growth so that a
    /// failing copy leaves the original block untouched.
    const RELOCATION_IS_INFALLIBLE: bool = true;

    /// `true` if [`duplicate`](Element::duplicate) can succeed at all.
    const DUPLICABLE: bool = true;

    /// Copy-construct a new value from `self`.
    fn duplicate(&self) -> Result<Self, ElementError>;

    /// Copy-assign `source` into `self`.
    ///
    /// On failure `self` must still be a valid, droppable value.
    fn assign_from(&mut self, source: &Self) -> Result<(), ElementError> {
        *self = source.duplicate()?;
        Ok(())
    }
}

/// How live elements move from an old block into a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferStrategy {
    /// Bitwise move; the old cells are abandoned without being dropped.
    Relocate,
    /// Duplicate into the new block, then drop the originals. A failure
    /// part-way leaves the old block fully intact.
    Duplicate,
}

impl TransferStrategy {
    /// The strategy used when growing storage for `T`.
    ///
    /// Relocation is preferred whenever it cannot fail. Types that declare
    /// relocation fallible but cannot be duplicated still relocate; there is
    /// no safety net for them.
    pub const fn of<T: Element>() -> Self {
        if T::RELOCATION_IS_INFALLIBLE || !T::DUPLICABLE {
            Self::Relocate
        } else {
            Self::Duplicate
        }
    }
}

/// Implement [`Element`] for one or more `Clone` types.
///
/// Duplication is `Clone::clone` and never reports failure; relocation is
/// declared infallible.
///
/// ```
/// #[derive(Clone)]
/// struct Point { x: i32, y: i32 }
/// advec_core::impl_element_via_clone!(Point);
///
/// use advec_core::{Element, TransferStrategy};
/// let p = Point { x: 1, y: 2 };
/// assert_eq!(p.duplicate().unwrap().y, 2);
/// assert_eq!(TransferStrategy::of::<Point>(), TransferStrategy::Relocate);
/// ```
#[macro_export]
macro_rules! impl_element_via_clone {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $ty {
                #[inline]
                fn duplicate(&self) -> ::core::result::Result<Self, $crate::ElementError> {
                    ::core::result::Result::Ok(::core::clone::Clone::clone(self))
                }

                #[inline]
                fn assign_from(
                    &mut self,
                    source: &Self,
                ) -> ::core::result::Result<(), $crate::ElementError> {
                    ::core::clone::Clone::clone_from(self, source);
                    ::core::result::Result::Ok(())
                }
            }
        )+
    };
}

impl_element_via_clone!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Element> Element for Option<T> {
    const RELOCATION_IS_INFALLIBLE: bool = T::RELOCATION_IS_INFALLIBLE;
    const DUPLICABLE: bool = T::DUPLICABLE;

    fn duplicate(&self) -> Result<Self, ElementError> {
        match self {
            Some(value) => value.duplicate().map(Some),
            None => Ok(None),
        }
    }
}

impl<T: Element> Element for Box<T> {
    // The heap cell behind the box never moves.
    const RELOCATION_IS_INFALLIBLE: bool = true;
    const DUPLICABLE: bool = T::DUPLICABLE;

    fn duplicate(&self) -> Result<Self, ElementError> {
        (**self).duplicate().map(Box::new)
    }
}

impl<T: Element> Element for Vec<T> {
    const DUPLICABLE: bool = T::DUPLICABLE;

    fn duplicate(&self) -> Result<Self, ElementError> {
        self.iter().map(Element::duplicate).collect()
    }
}

impl<A: Element, B: Element> Element for (A, B) {
    const RELOCATION_IS_INFALLIBLE: bool =
        A::RELOCATION_IS_INFALLIBLE && B::RELOCATION_IS_INFALLIBLE;
    const DUPLICABLE: bool = A::DUPLICABLE && B::DUPLICABLE;

    fn duplicate(&self) -> Result<Self, ElementError> {
        Ok((self.0.duplicate()?, self.1.duplicate()?))
    }
}
