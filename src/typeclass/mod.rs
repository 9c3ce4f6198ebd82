//! Type class traits for the measure algebra.
//!
//! - [`Semigroup`]: Associative binary operations
//! - [`Monoid`]: Semigroup with identity element
//! - [`Measured`]: Values annotated with a monoid measure
//!
//! ## Wrappers
//!
//! - [`Sum`]: additive monoid (`Sum<usize>` is the size measure)
//! - [`Max`], [`Min`]: bounded extremum monoids
//! - [`Last`]: rightmost present value (the ordered key measure)
//! - [`Bounded`]: Trait for types with minimum and maximum values
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::typeclass::{Monoid, Semigroup, Sum};
//!
//! let numbers = vec![Sum::new(1), Sum::new(2), Sum::new(3)];
//! assert_eq!(Sum::combine_all(numbers), Sum::new(6));
//! ```

mod measured;
mod monoid;
mod semigroup;
mod wrappers;

pub use measured::Measured;
pub use monoid::Monoid;
pub use semigroup::Semigroup;
pub use wrappers::{Bounded, Last, Max, Min, Sum};
