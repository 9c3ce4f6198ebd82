//! Persistent indexed sequence backed by a size-measured finger tree.
//!
//! Every element measures `Sum(1)`, so the measure of a subtree is its
//! length and an index search follows a single root-to-leaf path.
//!
//! # Overview
//!
//! - O(1) `len`, `head` and `last`
//! - amortized O(1) `prepend`, `append`, `tail` and `init`
//! - O(log n) `get`, `set`, `adjust`, `insert_at`, `remove_at`, `split_at`
//! - O(log min(n, m)) `concat`
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::persistent::RandomAccessSequence;
//!
//! let sequence: RandomAccessSequence<i32> = (10..100).collect();
//! let (front, back) = sequence.split_at(5);
//! assert_eq!(front.iter().copied().collect::<Vec<_>>(), vec![10, 11, 12, 13, 14]);
//! assert_eq!(back.head(), Ok(&15));
//!
//! let updated = sequence.set(0, -1).unwrap();
//! assert_eq!(updated[0], -1);
//! assert_eq!(sequence[0], 10);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::{Add, Index};

use super::FingerTreeError;
use super::finger_tree::{FingerTree, Leaves};
use crate::typeclass::{Measured, Monoid, Semigroup, Sum};

/// An element stored in the tree; measures as one.
struct Element<A>(A);

impl<A> Measured<Sum<usize>> for Element<A> {
    fn measure(&self) -> Sum<usize> {
        Sum::new(1)
    }
}

type SizedTree<A> = FingerTree<Element<A>, Sum<usize>>;

/// Becomes true once the prefix holds more than `index` elements.
fn past(index: usize) -> impl FnMut(&Sum<usize>) -> bool {
    move |size| size.0 > index
}

/// A persistent sequence with logarithmic indexing.
///
/// # Type Parameters
///
/// * `A` - The element type
pub struct RandomAccessSequence<A> {
    tree: SizedTree<A>,
}

impl<A> Clone for RandomAccessSequence<A> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<A> RandomAccessSequence<A> {
    /// Creates a new empty sequence.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: FingerTree::new(),
        }
    }

    const fn from_tree(tree: SizedTree<A>) -> Self {
        Self { tree }
    }

    /// Creates a sequence containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: A) -> Self {
        Self::from_tree(FingerTree::singleton(Element(element)))
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.measure().0
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn head(&self) -> Result<&A, FingerTreeError> {
        self.tree.head().map(|element| &element.0)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn last(&self) -> Result<&A, FingerTreeError> {
        self.tree.last().map(|element| &element.0)
    }

    /// Returns the sequence without its first element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn tail(&self) -> Result<Self, FingerTreeError> {
        self.tree.tail().map(Self::from_tree)
    }

    /// Returns the sequence without its last element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the sequence is empty.
    pub fn init(&self) -> Result<Self, FingerTreeError> {
        self.tree.init().map(Self::from_tree)
    }

    /// Adds an element to the front.
    #[must_use]
    pub fn prepend(&self, element: A) -> Self {
        Self::from_tree(self.tree.prepend(Element(element)))
    }

    /// Adds an element to the back.
    #[must_use]
    pub fn append(&self, element: A) -> Self {
        Self::from_tree(self.tree.append(Element(element)))
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get(&self, index: usize) -> Result<&A, FingerTreeError> {
        self.check_index(index)?;
        self.tree
            .find(past(index))
            .map(|element| &element.0)
            .ok_or_else(|| FingerTreeError::index_out_of_range(index, self.len()))
    }

    /// Returns a sequence with the element at `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&self, index: usize, element: A) -> Result<Self, FingerTreeError> {
        self.adjust(index, |_| element)
    }

    /// Returns a sequence with the element at `index` replaced by
    /// `function` applied to it.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::IndexOutOfRange`] if `index >= len()`.
    pub fn adjust<F>(&self, index: usize, function: F) -> Result<Self, FingerTreeError>
    where
        F: FnOnce(&A) -> A,
    {
        self.check_index(index)?;
        let split = self.tree.split_tree(past(index))?;
        let replacement = Element(function(&split.pivot().0));
        let (left, right) = split.into_sides();
        Ok(Self::from_tree(left.append(replacement).concat(&right)))
    }

    /// Returns a sequence with `element` inserted before position `index`.
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::IndexOutOfRange`] if `index > len()`.
    pub fn insert_at(&self, index: usize, element: A) -> Result<Self, FingerTreeError> {
        let length = self.len();
        if index > length {
            return Err(FingerTreeError::index_out_of_range(index, length));
        }
        let (left, right) = self.tree.split(past(index));
        Ok(Self::from_tree(left.append(Element(element)).concat(&right)))
    }

    /// Returns a sequence without the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&self, index: usize) -> Result<Self, FingerTreeError> {
        self.check_index(index)?;
        let (left, right) = self.tree.split_tree(past(index))?.into_sides();
        Ok(Self::from_tree(left.concat(&right)))
    }

    fn check_index(&self, index: usize) -> Result<(), FingerTreeError> {
        let length = self.len();
        if index < length {
            Ok(())
        } else {
            Err(FingerTreeError::index_out_of_range(index, length))
        }
    }

    /// Splits into the first `index` elements and the rest.
    ///
    /// An index past the end returns the whole sequence on the left.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn split_at(&self, index: usize) -> (Self, Self) {
        let (left, right) = self.tree.split(past(index));
        (Self::from_tree(left), Self::from_tree(right))
    }

    /// The first `count` elements.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        Self::from_tree(self.tree.take_until(past(count)))
    }

    /// Everything after the first `count` elements.
    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        Self::from_tree(self.tree.drop_until(past(count)))
    }

    /// Returns the elements in reverse order.
    ///
    /// Elements are shared with `self`, not cloned.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let reversed = self
            .tree
            .leaves(true)
            .fold(SizedTree::new(), |tree, leaf| tree.append_node(leaf.clone()));
        Self::from_tree(reversed)
    }

    /// Concatenates two sequences.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_tree(self.tree.concat(&other.tree))
    }

    /// Returns an iterator from first to last element.
    #[must_use]
    pub fn iter(&self) -> RandomAccessSequenceIterator<'_, A> {
        RandomAccessSequenceIterator {
            leaves: self.tree.leaves(false).with_len(self.len()),
        }
    }

    /// Returns an iterator from last to first element.
    #[must_use]
    pub fn iter_rev(&self) -> RandomAccessSequenceIterator<'_, A> {
        RandomAccessSequenceIterator {
            leaves: self.tree.leaves(true).with_len(self.len()),
        }
    }

    /// Folds the elements from first to last.
    pub fn fold_left<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &A) -> B,
    {
        self.iter().fold(initial, function)
    }

    /// Folds the elements from last to first.
    pub fn fold_right<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(&A, B) -> B,
    {
        self.iter_rev()
            .fold(initial, |accumulator, element| function(element, accumulator))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<A> Default for RandomAccessSequence<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Index<usize> for RandomAccessSequence<A> {
    type Output = A;

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index(&self, index: usize) -> &A {
        match self.get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<A: PartialEq> PartialEq for RandomAccessSequence<A> {
    fn eq(&self, other: &Self) -> bool {
        if self.tree.ptr_eq(&other.tree) {
            return true;
        }
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<A: Eq> Eq for RandomAccessSequence<A> {}

impl<A: fmt::Debug> fmt::Debug for RandomAccessSequence<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<A: Hash> Hash for RandomAccessSequence<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<A> FromIterator<A> for RandomAccessSequence<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::from_tree(iter.into_iter().map(Element).collect())
    }
}

impl<'a, A> IntoIterator for &'a RandomAccessSequence<A> {
    type Item = &'a A;
    type IntoIter = RandomAccessSequenceIterator<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A> Add for RandomAccessSequence<A> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.concat(&other)
    }
}

impl<A> Add for &RandomAccessSequence<A> {
    type Output = RandomAccessSequence<A>;

    fn add(self, other: Self) -> RandomAccessSequence<A> {
        self.concat(other)
    }
}

impl<A> Semigroup for RandomAccessSequence<A> {
    fn combine(self, other: Self) -> Self {
        self.concat(&other)
    }
}

impl<A> Monoid for RandomAccessSequence<A> {
    fn empty() -> Self {
        Self::new()
    }
}

/// An iterator over references to the elements of a
/// [`RandomAccessSequence`].
pub struct RandomAccessSequenceIterator<'a, A> {
    leaves: Leaves<'a, Element<A>, Sum<usize>>,
}

impl<'a, A> Iterator for RandomAccessSequenceIterator<'a, A> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        self.leaves.next().map(|leaf| &leaf.element().0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.leaves.size_hint()
    }
}

impl<A> ExactSizeIterator for RandomAccessSequenceIterator<'_, A> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn elements(sequence: &RandomAccessSequence<i32>) -> Vec<i32> {
        sequence.iter().copied().collect()
    }

    mod access {
        use super::*;

        #[rstest]
        fn len_is_constant_time_measure() {
            let sequence: RandomAccessSequence<i32> = (0..1234).collect();
            assert_eq!(sequence.len(), 1234);
            assert_eq!(sequence.iter().len(), 1234);
        }

        #[rstest]
        #[case(0)]
        #[case(1)]
        #[case(499)]
        #[case(999)]
        fn get_every_position(#[case] index: usize) {
            let sequence: RandomAccessSequence<usize> = (0..1000).collect();
            assert_eq!(sequence.get(index), Ok(&index));
            assert_eq!(sequence[index], index);
        }

        #[rstest]
        fn get_out_of_range() {
            let sequence: RandomAccessSequence<i32> = (0..3).collect();
            assert_eq!(
                sequence.get(3),
                Err(FingerTreeError::IndexOutOfRange { index: 3, length: 3 })
            );
        }

        #[rstest]
        #[should_panic(expected = "index 5 is out of range for a sequence of length 2")]
        fn index_operator_panics_out_of_range() {
            let sequence: RandomAccessSequence<i32> = (0..2).collect();
            let _element = sequence[5];
        }

        #[rstest]
        fn head_of_empty_is_error() {
            let sequence: RandomAccessSequence<i32> = RandomAccessSequence::new();
            assert_eq!(
                sequence.head(),
                Err(FingerTreeError::EmptyStructure { operation: "head" })
            );
        }
    }

    mod updates {
        use super::*;

        #[rstest]
        fn set_replaces_one_element() {
            let sequence: RandomAccessSequence<i32> = (0..10).collect();
            let updated = sequence.set(4, 40).unwrap();
            assert_eq!(elements(&updated), vec![0, 1, 2, 3, 40, 5, 6, 7, 8, 9]);
            assert_eq!(sequence[4], 4);
        }

        #[rstest]
        fn adjust_applies_function() {
            let sequence: RandomAccessSequence<i32> = (0..5).collect();
            let adjusted = sequence.adjust(2, |value| value * 100).unwrap();
            assert_eq!(elements(&adjusted), vec![0, 1, 200, 3, 4]);
        }

        #[rstest]
        fn set_out_of_range_is_error() {
            let sequence: RandomAccessSequence<i32> = (0..5).collect();
            assert!(matches!(
                sequence.set(5, 0),
                Err(FingerTreeError::IndexOutOfRange { index: 5, length: 5 })
            ));
        }

        #[rstest]
        #[case(0, vec![-1, 0, 1, 2])]
        #[case(2, vec![0, 1, -1, 2])]
        #[case(3, vec![0, 1, 2, -1])]
        fn insert_at_positions(#[case] index: usize, #[case] expected: Vec<i32>) {
            let sequence: RandomAccessSequence<i32> = (0..3).collect();
            assert_eq!(elements(&sequence.insert_at(index, -1).unwrap()), expected);
        }

        #[rstest]
        fn insert_at_past_end_is_error() {
            let sequence: RandomAccessSequence<i32> = (0..3).collect();
            assert!(sequence.insert_at(4, 0).is_err());
        }

        #[rstest]
        fn remove_at_drops_one_element() {
            let sequence: RandomAccessSequence<i32> = (0..6).collect();
            assert_eq!(elements(&sequence.remove_at(0).unwrap()), vec![1, 2, 3, 4, 5]);
            assert_eq!(elements(&sequence.remove_at(5).unwrap()), vec![0, 1, 2, 3, 4]);
            assert!(sequence.remove_at(6).is_err());
        }
    }

    mod slicing {
        use super::*;

        #[rstest]
        fn split_at_five() {
            let sequence: RandomAccessSequence<i32> = (10..=99).collect();
            let (front, back) = sequence.split_at(5);
            assert_eq!(elements(&front), (10..15).collect::<Vec<_>>());
            assert_eq!(elements(&back), (15..=99).collect::<Vec<_>>());
        }

        #[rstest]
        #[case(0)]
        #[case(7)]
        #[case(20)]
        #[case(25)]
        fn take_and_skip(#[case] count: usize) {
            let sequence: RandomAccessSequence<usize> = (0..20).collect();
            let taken: Vec<usize> = sequence.take(count).iter().copied().collect();
            let skipped: Vec<usize> = sequence.skip(count).iter().copied().collect();
            assert_eq!(taken, (0..count.min(20)).collect::<Vec<_>>());
            assert_eq!(skipped, (count.min(20)..20).collect::<Vec<_>>());
        }

        #[rstest]
        fn reverse_shares_elements() {
            let sequence: RandomAccessSequence<i32> = (0..50).collect();
            let reversed = sequence.reverse();
            assert_eq!(elements(&reversed), (0..50).rev().collect::<Vec<_>>());
            assert!(std::ptr::eq(sequence.head().unwrap(), reversed.last().unwrap()));
        }

        #[rstest]
        fn concat_and_add() {
            let left: RandomAccessSequence<i32> = (0..3).collect();
            let right: RandomAccessSequence<i32> = (3..5).collect();
            assert_eq!(elements(&left.concat(&right)), vec![0, 1, 2, 3, 4]);
            assert_eq!(elements(&(&left + &right)), vec![0, 1, 2, 3, 4]);
            assert_eq!((left + right).len(), 5);
        }
    }

    mod traits {
        use super::*;

        #[rstest]
        fn equality_ignores_shape() {
            let collected: RandomAccessSequence<i32> = (0..40).collect();
            let prepended = (0..40)
                .rev()
                .fold(RandomAccessSequence::new(), |sequence, value| sequence.prepend(value));
            assert_eq!(collected, prepended);
        }

        #[rstest]
        fn debug_lists_elements() {
            let sequence: RandomAccessSequence<i32> = (1..4).collect();
            assert_eq!(format!("{sequence:?}"), "[1, 2, 3]");
        }

        #[rstest]
        fn reverse_iterator_is_exact() {
            let sequence: RandomAccessSequence<i32> = (0..4).collect();
            let mut backward = sequence.iter_rev();
            assert_eq!(backward.len(), 4);
            assert_eq!(backward.next(), Some(&3));
            assert_eq!(backward.len(), 3);
        }

        #[rstest]
        fn monoid_laws_on_sample() {
            let sequence: RandomAccessSequence<i32> = (0..9).collect();
            assert_eq!(RandomAccessSequence::empty().combine(sequence.clone()), sequence);
            assert_eq!(sequence.clone().combine(RandomAccessSequence::empty()), sequence);
        }
    }
}
