//! Persistent minimum-first priority queue.
//!
//! A thin layer over [`OrderedSequence`]: the minimum sits at the left end
//! of the tree, so `peek` is O(1) and `pop` is amortized O(1). Priorities
//! that compare equal leave the queue in the order they were pushed.
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::persistent::PriorityQueue;
//!
//! let queue = PriorityQueue::new().push(4).push(1).push(3);
//! assert_eq!(queue.peek(), Some(&1));
//!
//! let (minimum, rest) = queue.pop().unwrap();
//! assert_eq!(*minimum, 1);
//! assert_eq!(rest.peek(), Some(&3));
//! assert_eq!(queue.len(), 3);
//! ```

use std::fmt;
use std::iter::FromIterator;

use super::{OrderedSequence, OrderedSequenceIterator};
use crate::typeclass::{Monoid, Semigroup};

/// A persistent priority queue yielding its smallest element first.
pub struct PriorityQueue<K> {
    sequence: OrderedSequence<K>,
}

impl<K> Clone for PriorityQueue<K> {
    fn clone(&self) -> Self {
        Self {
            sequence: self.sequence.clone(),
        }
    }
}

impl<K> PriorityQueue<K> {
    /// Creates a new empty queue.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sequence: OrderedSequence::new(),
        }
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the smallest element without removing it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&K> {
        self.sequence.min()
    }
}

impl<K: Ord + Clone> PriorityQueue<K> {
    /// Adds an element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn push(&self, element: K) -> Self {
        Self {
            sequence: self.sequence.insert(element),
        }
    }

    /// Returns the smallest element together with the remaining queue, or
    /// `None` if the queue is empty.
    ///
    /// # Complexity
    ///
    /// Amortized O(1)
    #[must_use]
    pub fn pop(&self) -> Option<(&K, Self)> {
        let minimum = self.sequence.min()?;
        let sequence = self.sequence.tail().ok()?;
        Some((minimum, Self { sequence }))
    }

    /// Combines two queues.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            sequence: self.sequence.merge(&other.sequence),
        }
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> OrderedSequenceIterator<'_, K> {
        self.sequence.iter()
    }
}

impl<K> Default for PriorityQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> PartialEq for PriorityQueue<K> {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl<K: Ord + Clone> Eq for PriorityQueue<K> {}

impl<K: Ord + Clone + fmt::Debug> fmt::Debug for PriorityQueue<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PriorityQueue")
            .field("elements", &self.sequence)
            .finish()
    }
}

impl<K: Ord + Clone> FromIterator<K> for PriorityQueue<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            sequence: iter.into_iter().collect(),
        }
    }
}

impl<'a, K: Ord + Clone> IntoIterator for &'a PriorityQueue<K> {
    type Item = &'a K;
    type IntoIter = OrderedSequenceIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord + Clone> Semigroup for PriorityQueue<K> {
    fn combine(self, other: Self) -> Self {
        self.merge(&other)
    }
}

impl<K: Ord + Clone> Monoid for PriorityQueue<K> {
    fn empty() -> Self {
        Self::new()
    }
}
