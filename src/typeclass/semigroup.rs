//! Semigroup type class - types with an associative binary operation.
//!
//! Every measure carried by a finger tree is a semigroup: the measure of a
//! subtree is the combination of the measures of its children, in order.
//!
//! # Laws
//!
//! For all `a`, `b`, `c` of type `T`:
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! Commutativity is *not* required. The key measure used by ordered
//! sequences is a "rightmost value wins" semigroup, which only works
//! because the tree always combines measures left to right.
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::typeclass::{Semigroup, Sum};
//!
//! assert_eq!(Sum::new(2).combine(Sum::new(3)), Sum::new(5));
//! ```

use super::wrappers::{Max, Min, Sum};
use std::ops::Add;

/// A type class for types with an associative binary operation.
///
/// # Examples
///
/// ```rust
/// use finger_collections::typeclass::{Max, Semigroup};
///
/// assert_eq!(Max::new(3).combine(Max::new(7)), Max::new(7));
/// ```
pub trait Semigroup {
    /// Combines two values into one.
    ///
    /// This operation must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Combines two values by reference, returning a new value.
    ///
    /// The default implementation clones both values and calls `combine`.
    /// Measures are combined by reference on every tree rebuild, so cheap
    /// types should override this.
    #[must_use]
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        self.clone().combine(other.clone())
    }

    /// Reduces all elements in an iterator using the semigroup operation.
    ///
    /// Returns `None` if the iterator is empty.
    fn reduce_all<I>(iterator: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .reduce(|accumulator, element| accumulator.combine(element))
    }
}

// =============================================================================
// Unit and Option
// =============================================================================

impl Semigroup for () {
    fn combine(self, _other: Self) -> Self {}

    fn combine_ref(&self, _other: &Self) -> Self {}
}

/// `None` is absorbed; two `Some` values are combined.
impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(left), Some(right)) => Some(left.combine(right)),
            (left @ Some(_), None) => left,
            (None, right) => right,
        }
    }
}

// =============================================================================
// Numeric Wrappers
// =============================================================================

impl<A: Add<Output = A>> Semigroup for Sum<A> {
    fn combine(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl<A: Ord> Semigroup for Max<A> {
    fn combine(self, other: Self) -> Self {
        if other.0 > self.0 { other } else { self }
    }
}

impl<A: Ord> Semigroup for Min<A> {
    fn combine(self, other: Self) -> Self {
        if other.0 < self.0 { other } else { self }
    }
}

// =============================================================================
// Tuples
// =============================================================================

/// Pairs combine component-wise, which lets one tree carry two measures
/// (for example a size and a maximum) at once.
impl<A: Semigroup, B: Semigroup> Semigroup for (A, B) {
    fn combine(self, other: Self) -> Self {
        (self.0.combine(other.0), self.1.combine(other.1))
    }
}

impl<A: Semigroup, B: Semigroup, C: Semigroup> Semigroup for (A, B, C) {
    fn combine(self, other: Self) -> Self {
        (
            self.0.combine(other.0),
            self.1.combine(other.1),
            self.2.combine(other.2),
        )
    }
}
