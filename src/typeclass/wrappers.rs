//! Newtype wrappers that select a monoid for an underlying type.
//!
//! - [`Sum`]: addition, identity `0`; the size measure of random-access
//!   sequences is `Sum<usize>`
//! - [`Max`]: maximum, identity is the type minimum
//! - [`Min`]: minimum, identity is the type maximum
//! - [`Last`]: rightmost present value, identity is "absent"; the key
//!   measure of ordered sequences is `Last<K>`
//!
//! The [`Bounded`] trait provides the identities of `Max` and `Min`.

use super::semigroup::Semigroup;
use super::monoid::Monoid;

macro_rules! define_wrapper {
    ($(#[$attribute:meta])* $name:ident) => {
        $(#[$attribute])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name<A>(pub A);

        impl<A> $name<A> {
            /// Wraps the given value.
            #[inline]
            pub const fn new(value: A) -> Self {
                Self(value)
            }

            /// Consumes the wrapper and returns the inner value.
            #[inline]
            pub fn into_inner(self) -> A {
                self.0
            }

            /// Returns a reference to the inner value.
            #[inline]
            pub const fn as_inner(&self) -> &A {
                &self.0
            }
        }

        impl<A> From<A> for $name<A> {
            fn from(value: A) -> Self {
                Self::new(value)
            }
        }
    };
}

define_wrapper!(
    /// The additive monoid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use finger_collections::typeclass::{Semigroup, Sum};
    ///
    /// assert_eq!(Sum::new(3).combine(Sum::new(5)).into_inner(), 8);
    /// ```
    Sum
);

define_wrapper!(
    /// The maximum monoid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use finger_collections::typeclass::{Max, Semigroup};
    ///
    /// assert_eq!(Max::new(3).combine(Max::new(5)).into_inner(), 5);
    /// ```
    Max
);

define_wrapper!(
    /// The minimum monoid.
    Min
);

// =============================================================================
// Last Wrapper
// =============================================================================

/// The "rightmost present value" monoid.
///
/// `Last(Some(a)).combine(Last(Some(b)))` is `Last(Some(b))`, and `Last(None)`
/// is the identity. Over a sorted sequence the last key is also the
/// greatest key, which makes `Last<K>` the measure of an ordered finger
/// tree: the measure of any prefix is the largest key in that prefix.
///
/// # Examples
///
/// ```rust
/// use finger_collections::typeclass::{Last, Monoid, Semigroup};
///
/// let combined = Last::new(Some(1)).combine(Last::new(Some(4)));
/// assert_eq!(combined.get(), Some(&4));
/// assert_eq!(Last::new(Some(4)).combine(Last::empty()).get(), Some(&4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Last<A>(pub Option<A>);

impl<A> Last<A> {
    /// Wraps an optional value.
    #[inline]
    pub const fn new(value: Option<A>) -> Self {
        Self(value)
    }

    /// Wraps a present value.
    #[inline]
    pub const fn of(value: A) -> Self {
        Self(Some(value))
    }

    /// Returns the wrapped value, if any.
    #[inline]
    pub const fn get(&self) -> Option<&A> {
        self.0.as_ref()
    }

    /// Consumes the wrapper and returns the optional value.
    #[inline]
    pub fn into_inner(self) -> Option<A> {
        self.0
    }
}

impl<A> Default for Last<A> {
    fn default() -> Self {
        Self(None)
    }
}

impl<A> Semigroup for Last<A> {
    fn combine(self, other: Self) -> Self {
        if other.0.is_some() { other } else { self }
    }

    // Clones only the surviving side.
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        if other.0.is_some() {
            other.clone()
        } else {
            self.clone()
        }
    }
}

impl<A> Monoid for Last<A> {
    fn empty() -> Self {
        Self(None)
    }
}

// =============================================================================
// Bounded
// =============================================================================

/// A type class for types with a minimum and a maximum value.
pub trait Bounded {
    /// The minimum value of this type.
    const MIN_VALUE: Self;

    /// The maximum value of this type.
    const MAX_VALUE: Self;
}

macro_rules! bounded_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl Bounded for $integer {
                const MIN_VALUE: Self = Self::MIN;
                const MAX_VALUE: Self = Self::MAX;
            }
        )*
    };
}

bounded_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Bounded for char {
    const MIN_VALUE: Self = '\0';
    const MAX_VALUE: Self = Self::MAX;
}

impl Bounded for bool {
    const MIN_VALUE: Self = false;
    const MAX_VALUE: Self = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sum_accessors() {
        let sum = Sum::new(42);
        assert_eq!(*sum.as_inner(), 42);
        assert_eq!(sum.into_inner(), 42);
        assert_eq!(Sum::from(7), Sum::new(7));
    }

    #[rstest]
    #[case(Last::of(1), Last::of(2), Some(2))]
    #[case(Last::of(1), Last::new(None), Some(1))]
    #[case(Last::new(None), Last::of(3), Some(3))]
    #[case(Last::new(None), Last::new(None), None)]
    fn last_keeps_rightmost_present_value(
        #[case] left: Last<i32>,
        #[case] right: Last<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(left.combine_ref(&right).into_inner(), expected);
        assert_eq!(left.combine(right).into_inner(), expected);
    }

    #[rstest]
    fn last_is_associative_on_sample() {
        let a = Last::of(1);
        let b = Last::new(None);
        let c = Last::of(3);
        assert_eq!(a.combine(b).combine(c), a.combine(b.combine(c)));
    }

    #[rstest]
    fn bounded_integers() {
        assert_eq!(i32::MIN_VALUE, i32::MIN);
        assert_eq!(u64::MAX_VALUE, u64::MAX);
        assert_eq!(char::MIN_VALUE, '\0');
    }
}
