//! Monoid type class - semigroups with an identity element.
//!
//! The identity element is the measure of an empty tree. Because the
//! monoid is chosen by the measure *type*, every empty tree of a given
//! measure is the same zero-sized value and no per-instance registry of
//! empty trees is needed.
//!
//! # Laws
//!
//! ```text
//! T::empty().combine(a) == a
//! a.combine(T::empty()) == a
//! ```
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::typeclass::{Monoid, Semigroup, Sum};
//!
//! assert_eq!(Sum::<i32>::empty().combine(Sum::new(5)), Sum::new(5));
//! assert_eq!(Sum::combine_all(vec![Sum::new(1), Sum::new(2)]), Sum::new(3));
//! ```

use std::ops::Add;

use super::semigroup::Semigroup;
use super::wrappers::{Bounded, Max, Min, Sum};

/// A type class for semigroups with an identity element.
pub trait Monoid: Semigroup {
    /// Returns the identity element for this monoid.
    fn empty() -> Self;

    /// Combines all elements in an iterator, starting from the identity element.
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), |accumulator, element| {
                accumulator.combine(element)
            })
    }

    /// Returns whether this value is the identity element.
    fn is_empty_value(&self) -> bool
    where
        Self: PartialEq + Sized,
    {
        *self == Self::empty()
    }
}

impl Monoid for () {
    fn empty() -> Self {}
}

impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl<A: Add<Output = A> + Default> Monoid for Sum<A> {
    fn empty() -> Self {
        Self(A::default())
    }
}

/// Max forms a monoid with the minimum bound as the identity.
impl<A: Ord + Bounded> Monoid for Max<A> {
    fn empty() -> Self {
        Self(A::MIN_VALUE)
    }
}

/// Min forms a monoid with the maximum bound as the identity.
impl<A: Ord + Bounded> Monoid for Min<A> {
    fn empty() -> Self {
        Self(A::MAX_VALUE)
    }
}

impl<A: Monoid, B: Monoid> Monoid for (A, B) {
    fn empty() -> Self {
        (A::empty(), B::empty())
    }
}

impl<A: Monoid, B: Monoid, C: Monoid> Monoid for (A, B, C) {
    fn empty() -> Self {
        (A::empty(), B::empty(), C::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sum_identity() {
        let value = Sum::new(17_u64);
        assert_eq!(Sum::empty().combine(value), value);
        assert_eq!(value.combine(Sum::empty()), value);
    }

    #[rstest]
    fn max_identity_is_minimum_bound() {
        assert_eq!(Max::<i32>::empty(), Max::new(i32::MIN));
        assert_eq!(Max::empty().combine(Max::new(-5)), Max::new(-5));
    }

    #[rstest]
    fn min_identity_is_maximum_bound() {
        assert_eq!(Min::<u8>::empty(), Min::new(u8::MAX));
    }

    #[rstest]
    fn combine_all_of_empty_is_identity() {
        let empty: Vec<Sum<i32>> = Vec::new();
        assert_eq!(Sum::combine_all(empty), Sum::empty());
    }

    #[rstest]
    fn is_empty_value_detects_identity() {
        assert!(Sum::<i32>::empty().is_empty_value());
        assert!(!Sum::new(1).is_empty_value());
        assert!(Option::<Sum<i32>>::empty().is_empty_value());
    }

    #[rstest]
    fn pair_identity() {
        let pair = (Sum::new(3), Max::new(8));
        assert_eq!(<(Sum<i32>, Max<i32>)>::empty().combine(pair), pair);
    }
}
