//! # finger-collections
//!
//! Persistent (immutable, structurally shared) 2-3 finger trees annotated
//! with a monoid measure, and the collections built on top of them.
//!
//! ## Overview
//!
//! - **Type Classes**: [`Semigroup`](typeclass::Semigroup),
//!   [`Monoid`](typeclass::Monoid) and [`Measured`](typeclass::Measured)
//!   describe the annotation algebra
//! - **Control Structures**: [`Suspension`](control::Suspension), a one-shot
//!   memoizing cell used for the lazily evaluated middle of a finger tree
//! - **Persistent Data Structures**:
//!   - [`FingerTree`](persistent::FingerTree): the general monoid-measured tree
//!   - [`OrderedSequence`](persistent::OrderedSequence) and
//!     [`PriorityQueue`](persistent::PriorityQueue): key-ordered trees
//!   - [`RandomAccessSequence`](persistent::RandomAccessSequence): size-measured tree
//!
//! ## Feature Flags
//!
//! - `typeclass`: Semigroup, Monoid, Measured and the numeric wrappers
//! - `control`: the `Suspension` cell
//! - `persistent`: the finger tree family
//! - `arc`: share nodes through `Arc` so trees are `Send + Sync`
//! - `serde`: serialize sequence types as plain sequences
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use finger_collections::prelude::*;
//!
//! let sequence: RandomAccessSequence<i32> = (0..10).collect();
//! let (left, right) = sequence.split_at(4);
//! assert_eq!(left.len(), 4);
//! assert_eq!(right.head(), Ok(&4));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use finger_collections::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;
