//! Measured type class - elements that carry a monoid annotation.
//!
//! A finger tree is generic over its element type `A` and its measure type
//! `M`. The only thing the tree asks of an element is its measure; every
//! subtree caches the combination of its elements' measures so that
//! searching and splitting never visit more than a logarithmic number of
//! nodes.
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::typeclass::{Measured, Sum};
//!
//! struct Word(&'static str);
//!
//! impl Measured<Sum<usize>> for Word {
//!     fn measure(&self) -> Sum<usize> {
//!         Sum::new(self.0.len())
//!     }
//! }
//!
//! assert_eq!(Word("finger").measure(), Sum::new(6));
//! ```

/// A type class for values annotated with a measure of type `M`.
///
/// `M` is expected to be a [`Monoid`](super::Monoid); the measure of a
/// sequence is the left-to-right combination of its elements' measures.
pub trait Measured<M> {
    /// Returns the measure of this value.
    fn measure(&self) -> M;
}

impl<M, T: Measured<M> + ?Sized> Measured<M> for &T {
    fn measure(&self) -> M {
        (**self).measure()
    }
}

impl<M, T: Measured<M> + ?Sized> Measured<M> for Box<T> {
    fn measure(&self) -> M {
        (**self).measure()
    }
}
