//! Error types for finger-tree operations.
//!
//! Absence that is part of normal use (a missing key, an empty queue) is
//! reported with `Option`. Misuse of the structure itself, such as asking
//! an empty tree for its head or indexing past the end of a sequence, is
//! reported with [`FingerTreeError`] so callers can tell the two apart.

/// Errors raised by finger-tree operations.
///
/// # Examples
///
/// ```rust
/// use finger_collections::persistent::{FingerTreeError, RandomAccessSequence};
///
/// let empty: RandomAccessSequence<i32> = RandomAccessSequence::new();
/// assert_eq!(
///     empty.head(),
///     Err(FingerTreeError::EmptyStructure { operation: "head" })
/// );
///
/// let sequence: RandomAccessSequence<i32> = (0..3).collect();
/// assert_eq!(
///     sequence.get(3),
///     Err(FingerTreeError::IndexOutOfRange { index: 3, length: 3 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FingerTreeError {
    /// A frontier or split operation was applied to an empty structure.
    #[error("{operation}: the structure is empty")]
    EmptyStructure {
        /// The name of the rejected operation.
        operation: &'static str,
    },
    /// An index was outside `0..length`.
    #[error("index {index} is out of range for a sequence of length {length}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The length of the sequence at the time of the call.
        length: usize,
    },
}

impl FingerTreeError {
    pub(crate) fn empty_structure(operation: &'static str) -> Self {
        tracing::debug!(operation, "finger tree operation rejected: empty structure");
        Self::EmptyStructure { operation }
    }

    pub(crate) fn index_out_of_range(index: usize, length: usize) -> Self {
        tracing::debug!(index, length, "finger tree operation rejected: index out of range");
        Self::IndexOutOfRange { index, length }
    }
}
