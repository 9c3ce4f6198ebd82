//! Control structures for deferred evaluation.
//!
//! - [`Suspension`]: a one-shot memoizing cell holding a [`Deferred`]
//!   computation
//! - [`Thunk`]: adapts a closure into a [`Deferred`] computation
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::control::Suspension;
//!
//! let suspension = Suspension::from_fn(|| (1..=10).sum::<i32>());
//! assert_eq!(*suspension.force(), 55);
//! ```

mod suspension;

pub use suspension::{Deferred, Suspension, Thunk};
