//! Persistent (immutable) finger-tree collections.
//!
//! Every structure in this module is a 2-3 finger tree annotated with a
//! monoid measure. All operations return new versions and share unchanged
//! subtrees with the original:
//!
//! - [`FingerTree`]: the general tree, measured by any [`Monoid`](crate::typeclass::Monoid)
//! - [`OrderedSequence`]: sorted multiset, measured by its greatest key
//! - [`PriorityQueue`]: minimum-first queue over an [`OrderedSequence`]
//! - [`RandomAccessSequence`]: indexed sequence, measured by size
//!
//! # Complexity
//!
//! | Operation                   | Bound                    |
//! |-----------------------------|--------------------------|
//! | `head`, `last`              | O(1)                     |
//! | `prepend`, `append`         | amortized O(1)           |
//! | `tail`, `init`              | amortized O(1)           |
//! | `concat`                    | amortized O(log min(n, m)) |
//! | `split`, `get`, `split_at`  | amortized O(log n)       |
//! | `merge`, `intersect`        | O(m log(n/m))            |
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::persistent::{OrderedSequence, RandomAccessSequence};
//!
//! let sequence: RandomAccessSequence<char> = "finger".chars().collect();
//! assert_eq!(sequence.get(2), Ok(&'n'));
//!
//! let ordered: OrderedSequence<i32> = [5, 3, 4].into_iter().collect();
//! assert_eq!(ordered.min(), Some(&3));
//! assert_eq!(ordered.max(), Some(&5));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod finger_tree;
mod ordered_sequence;
mod priority_queue;
mod random_access_sequence;

#[cfg(feature = "serde")]
mod serialization;

pub use error::FingerTreeError;
pub use finger_tree::{FingerTree, FingerTreeIterator, FingerTreeReverseIterator, Split};
pub use ordered_sequence::{Bias, OrderedSequence, OrderedSequenceIterator};
pub use priority_queue::PriorityQueue;
pub use random_access_sequence::{RandomAccessSequence, RandomAccessSequenceIterator};

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(RandomAccessSequence<i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(OrderedSequence<String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(RandomAccessSequence<i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
