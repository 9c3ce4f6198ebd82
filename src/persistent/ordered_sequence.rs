//! Persistent sorted sequence (multiset) backed by a key-measured finger tree.
//!
//! `OrderedSequence<K>` keeps its keys in ascending order. Each subtree is
//! annotated with its rightmost key, which for a sorted run is also its
//! greatest key, so a search for any key descends a single path.
//!
//! # Overview
//!
//! - O(1) `min` and `max`
//! - O(log n) `insert`, `contains`, `get` and the range splits
//! - O(m log(n/m)) `merge` and `intersect` for sequences of sizes m ≤ n
//! - O(n) `len`; the key measure does not count elements
//!
//! Equal keys are kept; inserting a key that is already present adds
//! another copy after the existing ones.
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::persistent::{Bias, OrderedSequence};
//!
//! let sequence: OrderedSequence<i32> = [8, 3, 5, 3, 13].into_iter().collect();
//! assert_eq!(sequence.iter().copied().collect::<Vec<_>>(), vec![3, 3, 5, 8, 13]);
//!
//! let (small, large) = sequence.split(&5, Bias::Left);
//! assert_eq!(small.max(), Some(&5));
//! assert_eq!(large.min(), Some(&8));
//!
//! let other: OrderedSequence<i32> = [1, 5, 21].into_iter().collect();
//! assert_eq!(sequence.merge(&other).len(), 8);
//! assert_eq!(sequence.intersect(&other).iter().copied().collect::<Vec<_>>(), vec![5]);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::FingerTreeError;
use super::finger_tree::{FingerTree, Leaves, NodeRef};
use crate::typeclass::{Last, Measured, Monoid, Semigroup};

/// Where keys equal to a split key go.
///
/// # Examples
///
/// ```rust
/// use finger_collections::persistent::{Bias, OrderedSequence};
///
/// let sequence: OrderedSequence<i32> = [1, 2, 2, 3].into_iter().collect();
/// assert_eq!(sequence.split(&2, Bias::Left).0.len(), 3);
/// assert_eq!(sequence.split(&2, Bias::Right).0.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bias {
    /// Equal keys end up on the left side.
    Left,
    /// Equal keys end up on the right side.
    Right,
}

/// A key stored in the tree; measures as itself.
struct Key<K>(K);

impl<K: Clone> Measured<Last<K>> for Key<K> {
    fn measure(&self) -> Last<K> {
        Last::of(self.0.clone())
    }
}

type KeyTree<K> = FingerTree<Key<K>, Last<K>>;

/// Returns the monotone predicate that becomes true at the first key past
/// `target`, where "past" includes equal keys only for [`Bias::Right`].
fn passes<K: Ord>(target: &K, bias: Bias) -> impl FnMut(&Last<K>) -> bool + '_ {
    move |measure| {
        measure.get().is_some_and(|key| match bias {
            Bias::Left => key > target,
            Bias::Right => key >= target,
        })
    }
}

/// A persistent sorted multiset.
///
/// # Type Parameters
///
/// * `K` - The key type, ordered by `Ord`
pub struct OrderedSequence<K> {
    tree: KeyTree<K>,
}

impl<K> Clone for OrderedSequence<K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K> OrderedSequence<K> {
    /// Creates a new empty sequence.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: FingerTree::new(),
        }
    }

    /// Returns `true` if the sequence contains no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the smallest key, if any.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        self.tree.first().map(|key| &key.0)
    }

    /// Returns the greatest key, if any.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        self.tree.final_element().map(|key| &key.0)
    }

    const fn from_tree(tree: KeyTree<K>) -> Self {
        Self { tree }
    }
}

impl<K: Ord + Clone> OrderedSequence<K> {
    /// Creates a sequence containing a single key.
    #[inline]
    #[must_use]
    pub fn singleton(key: K) -> Self {
        Self::from_tree(FingerTree::singleton(Key(key)))
    }

    /// Builds a sequence from keys that are already in ascending order.
    ///
    /// The order is trusted, not checked. Searches over unsorted input
    /// return unspecified (but memory-safe) results.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn from_sorted<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self::from_tree(keys.into_iter().map(Key).collect())
    }

    /// Returns the number of keys.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn head(&self) -> Result<&K, FingerTreeError> {
        self.tree.head().map(|key| &key.0)
    }

    /// Returns the greatest key.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn last(&self) -> Result<&K, FingerTreeError> {
        self.tree.last().map(|key| &key.0)
    }

    /// Returns the sequence without its smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn tail(&self) -> Result<Self, FingerTreeError> {
        self.tree.tail().map(Self::from_tree)
    }

    /// Returns the sequence without its greatest key.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn init(&self) -> Result<Self, FingerTreeError> {
        self.tree.init().map(Self::from_tree)
    }

    /// Inserts a key after any equal keys already present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        let (left, right) = self.tree.split(passes(&key, Bias::Left));
        Self::from_tree(left.append(Key(key)).concat(&right))
    }

    /// Inserts every key from the iterator.
    #[must_use]
    pub fn insert_all<I: IntoIterator<Item = K>>(&self, keys: I) -> Self {
        self.merge(&keys.into_iter().collect())
    }

    /// Splits the sequence at `key`.
    ///
    /// Keys less than `key` go left and keys greater go right. Keys equal
    /// to it go to the side named by `bias`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn split(&self, key: &K, bias: Bias) -> (Self, Self) {
        let (left, right) = self.tree.split(passes(key, bias));
        (Self::from_tree(left), Self::from_tree(right))
    }

    /// Keys strictly less than `key`.
    #[must_use]
    pub fn less_than(&self, key: &K) -> Self {
        Self::from_tree(self.tree.take_until(passes(key, Bias::Right)))
    }

    /// Keys less than or equal to `key`.
    #[must_use]
    pub fn at_most(&self, key: &K) -> Self {
        Self::from_tree(self.tree.take_until(passes(key, Bias::Left)))
    }

    /// Keys greater than or equal to `key`.
    #[must_use]
    pub fn at_least(&self, key: &K) -> Self {
        Self::from_tree(self.tree.drop_until(passes(key, Bias::Right)))
    }

    /// Keys strictly greater than `key`.
    #[must_use]
    pub fn greater_than(&self, key: &K) -> Self {
        Self::from_tree(self.tree.drop_until(passes(key, Bias::Left)))
    }

    /// Splits into keys less than, equal to, and greater than `key`.
    #[must_use]
    pub fn split_three(&self, key: &K) -> (Self, Self, Self) {
        let (less, rest) = self.split(key, Bias::Right);
        let (equal, greater) = rest.split(key, Bias::Left);
        (less, equal, greater)
    }

    /// Separates every copy of `key` from the rest.
    ///
    /// Returns `(copies, rest)`.
    #[must_use]
    pub fn extract_all(&self, key: &K) -> (Self, Self) {
        let (less, equal, greater) = self.split_three(key);
        (equal, less.concat_ordered(&greater))
    }

    /// Removes one copy of `key`, returning it with the remaining keys.
    ///
    /// Returns `None` if `key` is absent.
    #[must_use]
    pub fn extract_one(&self, key: &K) -> Option<(&K, Self)> {
        let found = self.get(key)?;
        let (less, rest) = self.tree.split(passes(key, Bias::Right));
        let rest = rest.tail().ok()?;
        Some((found, Self::from_tree(less.concat(&rest))))
    }

    /// Removes every copy of `key`.
    #[must_use]
    pub fn remove_all(&self, key: &K) -> Self {
        self.extract_all(key).1
    }

    /// Returns the first stored key equal to `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.least_greater_or_equal(key)
            .filter(|found| *found == key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the smallest key that is greater than or equal to `key`.
    #[must_use]
    pub fn least_greater_or_equal(&self, key: &K) -> Option<&K> {
        self.tree
            .find(passes(key, Bias::Right))
            .map(|found| &found.0)
    }

    /// Joins two sequences where every key of `self` is at most every key
    /// of `other`.
    fn concat_ordered(&self, other: &Self) -> Self {
        Self::from_tree(self.tree.concat(&other.tree))
    }

    /// Multiset union.
    ///
    /// Equal keys from `self` come before equal keys from `other`. Runs of
    /// keys that do not interleave are moved with a single split, so
    /// merging disjoint ranges costs O(log n).
    ///
    /// # Complexity
    ///
    /// O(m log(n/m)) where m ≤ n are the sizes of the operands
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = KeyTree::new();
        let mut source = self.tree.clone();
        let mut pending = other.tree.clone();
        let mut source_is_self = true;
        loop {
            if source.is_empty() {
                return Self::from_tree(merged.concat(&pending));
            }
            let Some((minimum, rest)) = pending.tree().view_left() else {
                return Self::from_tree(merged.concat(&source));
            };
            let bias = if source_is_self { Bias::Left } else { Bias::Right };
            let (lower, upper) = source.split(passes(&minimum.element().0, bias));
            merged = merged.concat(&lower).append_node(minimum);
            source = KeyTree::from_tree(rest);
            pending = upper;
            source_is_self = !source_is_self;
        }
    }

    /// Multiset intersection.
    ///
    /// A key occurring `a` times in `self` and `b` times in `other` occurs
    /// `min(a, b)` times in the result.
    ///
    /// # Complexity
    ///
    /// O(m log(n/m)) where m ≤ n are the sizes of the operands
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let mut common = KeyTree::new();
        let mut source = self.tree.clone();
        let mut pending = other.tree.clone();
        loop {
            if source.is_empty() {
                return Self::from_tree(common);
            }
            let Some((candidate, rest)) = pending.tree().view_left() else {
                return Self::from_tree(common);
            };
            let at_least = source.drop_until(passes(&candidate.element().0, Bias::Right));
            let front = at_least.tree().view_left();
            let unmatched = match front {
                Some((first, remainder)) if first.element().0 == candidate.element().0 => {
                    common = common.append_node(candidate);
                    KeyTree::from_tree(remainder)
                }
                _ => at_least,
            };
            source = KeyTree::from_tree(rest);
            pending = unmatched;
        }
    }

    /// Returns an iterator over the keys in ascending order.
    #[must_use]
    pub fn iter(&self) -> OrderedSequenceIterator<'_, K> {
        OrderedSequenceIterator {
            leaves: self.tree.leaves(false),
        }
    }

    /// Returns an iterator over the keys in descending order.
    #[must_use]
    pub fn iter_rev(&self) -> OrderedSequenceIterator<'_, K> {
        OrderedSequenceIterator {
            leaves: self.tree.leaves(true),
        }
    }

    /// Folds the keys in ascending order.
    pub fn fold_left<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &K) -> B,
    {
        self.iter().fold(initial, function)
    }

    /// Folds the keys in descending order.
    pub fn fold_right<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(&K, B) -> B,
    {
        self.iter_rev()
            .fold(initial, |accumulator, key| function(key, accumulator))
    }

    #[cfg(test)]
    fn nodes_are_shared_with(&self, other: &Self) -> bool {
        self.tree.ptr_eq(&other.tree)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K> Default for OrderedSequence<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> PartialEq for OrderedSequence<K> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.ptr_eq(&other.tree) || self.iter().eq(other.iter())
    }
}

impl<K: Ord + Clone> Eq for OrderedSequence<K> {}

impl<K: Ord + Clone + fmt::Debug> fmt::Debug for OrderedSequence<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<K: Ord + Clone + Hash> Hash for OrderedSequence<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut count = 0_usize;
        for key in self {
            key.hash(state);
            count += 1;
        }
        count.hash(state);
    }
}

impl<K: Ord + Clone> FromIterator<K> for OrderedSequence<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut keys: Vec<K> = iter.into_iter().collect();
        keys.sort();
        Self::from_sorted(keys)
    }
}

impl<'a, K: Ord + Clone> IntoIterator for &'a OrderedSequence<K> {
    type Item = &'a K;
    type IntoIter = OrderedSequenceIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord + Clone> Semigroup for OrderedSequence<K> {
    fn combine(self, other: Self) -> Self {
        self.merge(&other)
    }
}

impl<K: Ord + Clone> Monoid for OrderedSequence<K> {
    fn empty() -> Self {
        Self::new()
    }
}

/// An iterator over references to the keys of an [`OrderedSequence`].
pub struct OrderedSequenceIterator<'a, K> {
    leaves: Leaves<'a, Key<K>, Last<K>>,
}

impl<'a, K: Clone> Iterator for OrderedSequenceIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.leaves
            .next()
            .map(|node: &'a NodeRef<Key<K>, Last<K>>| &node.element().0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.leaves.size_hint()
    }
}
