//! The general monoid-annotated finger tree.
//!
//! This module provides [`FingerTree`], a persistent sequence in which
//! every subtree caches the combined [`Measured`] annotation of its
//! elements, following Hinze & Paterson's "Finger Trees: A Simple
//! General-purpose Data Structure" (2006).
//!
//! # Overview
//!
//! - O(1) `head` and `last`
//! - amortized O(1) `prepend`, `append`, `tail` and `init`
//! - amortized O(log min(n, m)) `concat`
//! - amortized O(log n) `split`, `find`, `take_until` and `drop_until`
//!
//! The measure is chosen by type. Any `M: Monoid + Clone` works as long
//! as the elements implement `Measured<M>`:
//!
//! - `Sum<usize>` with every element measuring one gives positional
//!   indexing ([`RandomAccessSequence`](crate::persistent::RandomAccessSequence))
//! - `Last<K>` over sorted keys gives key search
//!   ([`OrderedSequence`](crate::persistent::OrderedSequence))
//!
//! # Structure
//!
//! A tree is empty, a single node, or deep: one to four nodes on each
//! side and a middle tree of 2-3 branches one level down. The middle is
//! held in a memoized [`Suspension`](crate::control::Suspension) and is
//! only rebuilt when an operation actually reaches it.
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::persistent::FingerTree;
//! use finger_collections::typeclass::{Measured, Sum};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Word(&'static str);
//!
//! impl Measured<Sum<usize>> for Word {
//!     fn measure(&self) -> Sum<usize> {
//!         Sum::new(self.0.len())
//!     }
//! }
//!
//! let text: FingerTree<Word, Sum<usize>> =
//!     ["finger", "trees", "split", "here"].into_iter().map(Word).collect();
//! assert_eq!(text.measure(), Sum::new(20));
//!
//! // Split before the word containing the 12th character.
//! let (before, after) = text.split(|characters| characters.0 > 11);
//! assert_eq!(before.iter().count(), 2);
//! assert_eq!(after.head(), Ok(&Word("split")));
//! ```

mod concat;
mod iter;
mod node;
mod split;
mod tree;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Add;

use self::concat::concat_with_middle;
pub(crate) use self::iter::Leaves;
pub(crate) use self::node::{Node, NodeRef};
use self::split::Sides;
pub(crate) use self::tree::Tree;
use super::FingerTreeError;
use crate::typeclass::{Measured, Monoid, Semigroup};

/// A persistent finger tree annotated with the monoid `M`.
///
/// # Type Parameters
///
/// * `A` - The element type, measured into `M`
/// * `M` - The measure monoid
///
/// # Examples
///
/// ```rust
/// use finger_collections::persistent::FingerTree;
/// use finger_collections::typeclass::{Measured, Sum};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Unit(char);
///
/// impl Measured<Sum<usize>> for Unit {
///     fn measure(&self) -> Sum<usize> {
///         Sum::new(1)
///     }
/// }
///
/// let tree: FingerTree<Unit, Sum<usize>> =
///     FingerTree::new().append(Unit('b')).prepend(Unit('a'));
/// assert_eq!(tree.measure(), Sum::new(2));
/// assert_eq!(tree.head(), Ok(&Unit('a')));
/// assert_eq!(tree.last(), Ok(&Unit('b')));
/// ```
pub struct FingerTree<A, M> {
    tree: Tree<A, M>,
}

/// The pieces of a tree around the element where a predicate first holds.
///
/// Produced by [`FingerTree::split_tree`].
pub struct Split<A, M> {
    left: FingerTree<A, M>,
    pivot: NodeRef<A, M>,
    right: FingerTree<A, M>,
}

impl<A, M> Clone for FingerTree<A, M> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<A, M> FingerTree<A, M> {
    /// Creates a new empty tree.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { tree: Tree::Empty }
    }

    /// Returns `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns `true` if both trees are the same shared version.
    ///
    /// Two empty trees are always the same version.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.tree.ptr_eq(&other.tree)
    }

    pub(crate) const fn from_tree(tree: Tree<A, M>) -> Self {
        Self { tree }
    }

    pub(crate) const fn tree(&self) -> &Tree<A, M> {
        &self.tree
    }

    /// The first element, if any.
    pub(crate) fn first(&self) -> Option<&A> {
        self.tree.first_node().map(|node| node.element())
    }

    /// The last element, if any.
    pub(crate) fn final_element(&self) -> Option<&A> {
        self.tree.last_node().map(|node| node.element())
    }
}

impl<A: Measured<M>, M: Monoid + Clone> FingerTree<A, M> {
    /// Creates a tree containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: A) -> Self {
        Self::from_tree(Tree::Single(Node::leaf(element)))
    }

    /// Returns the combined measure of all elements.
    ///
    /// The empty tree measures `M::empty()`.
    #[inline]
    #[must_use]
    pub fn measure(&self) -> M {
        self.tree.measure()
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the tree is empty.
    pub fn head(&self) -> Result<&A, FingerTreeError> {
        self.first()
            .ok_or_else(|| FingerTreeError::empty_structure("head"))
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the tree is empty.
    pub fn last(&self) -> Result<&A, FingerTreeError> {
        self.final_element()
            .ok_or_else(|| FingerTreeError::empty_structure("last"))
    }

    /// Returns the tree without its first element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the tree is empty.
    pub fn tail(&self) -> Result<Self, FingerTreeError> {
        self.view_left()
            .map(|(_, rest)| rest)
            .ok_or_else(|| FingerTreeError::empty_structure("tail"))
    }

    /// Returns the tree without its last element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the tree is empty.
    pub fn init(&self) -> Result<Self, FingerTreeError> {
        self.view_right()
            .map(|(rest, _)| rest)
            .ok_or_else(|| FingerTreeError::empty_structure("init"))
    }

    /// Returns the first element and the rest of the tree.
    #[must_use]
    pub fn view_left(&self) -> Option<(&A, Self)> {
        let (_, rest) = self.tree.view_left()?;
        Some((self.first()?, Self::from_tree(rest)))
    }

    /// Returns the rest of the tree and its last element.
    #[must_use]
    pub fn view_right(&self) -> Option<(Self, &A)> {
        let (rest, _) = self.tree.view_right()?;
        Some((Self::from_tree(rest), self.final_element()?))
    }

    /// Adds an element to the front.
    ///
    /// # Complexity
    ///
    /// Amortized O(1)
    #[must_use]
    pub fn prepend(&self, element: A) -> Self {
        self.prepend_node(Node::leaf(element))
    }

    /// Adds an element to the back.
    ///
    /// # Complexity
    ///
    /// Amortized O(1)
    #[must_use]
    pub fn append(&self, element: A) -> Self {
        self.append_node(Node::leaf(element))
    }

    pub(crate) fn prepend_node(&self, node: NodeRef<A, M>) -> Self {
        Self::from_tree(self.tree.prepend_node(node))
    }

    pub(crate) fn append_node(&self, node: NodeRef<A, M>) -> Self {
        Self::from_tree(self.tree.append_node(node))
    }

    /// Concatenates two trees.
    ///
    /// Neither operand is modified; the result shares both outer digits.
    ///
    /// # Complexity
    ///
    /// Amortized O(log min(n, m))
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_tree(concat_with_middle(&self.tree, &[], &other.tree))
    }

    /// Splits the tree where `predicate` on the prefix measure first
    /// becomes true.
    ///
    /// The predicate must be monotone: once true for a prefix it stays true
    /// for every longer prefix. The left part is the longest prefix whose
    /// measure does not satisfy it; the right part starts with the element
    /// that made it true.
    ///
    /// - Empty tree: both parts are empty.
    /// - Predicate false on the whole measure: `(self, empty)`.
    /// - Predicate true on `M::empty()`: `(empty, self)`.
    ///
    /// # Complexity
    ///
    /// Amortized O(log n)
    #[must_use]
    pub fn split<P>(&self, mut predicate: P) -> (Self, Self)
    where
        P: FnMut(&M) -> bool,
    {
        self.split_sides(&mut predicate, Sides::BOTH)
    }

    /// Returns the elements before the point where `predicate` first holds.
    ///
    /// Equivalent to `self.split(predicate).0` without building the
    /// right part.
    #[must_use]
    pub fn take_until<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&M) -> bool,
    {
        self.split_sides(&mut predicate, Sides::LEFT).0
    }

    /// Returns the elements from the point where `predicate` first holds.
    ///
    /// Equivalent to `self.split(predicate).1` without building the
    /// left part.
    #[must_use]
    pub fn drop_until<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&M) -> bool,
    {
        self.split_sides(&mut predicate, Sides::RIGHT).1
    }

    fn split_sides<P>(&self, predicate: &mut P, sides: Sides) -> (Self, Self)
    where
        P: FnMut(&M) -> bool,
    {
        if self.is_empty() {
            return (Self::new(), Self::new());
        }
        if !predicate(&self.measure()) {
            return (self.clone(), Self::new());
        }
        if predicate(&M::empty()) {
            return (Self::new(), self.clone());
        }
        match self.tree.split_node(predicate, &M::empty(), sides) {
            Some(split) => {
                let right = if sides.right {
                    split.right.prepend_node(split.pivot)
                } else {
                    Tree::Empty
                };
                (Self::from_tree(split.left), Self::from_tree(right))
            }
            None => (Self::new(), Self::new()),
        }
    }

    /// Splits a non-empty tree into the elements before the pivot, the
    /// pivot, and the elements after it.
    ///
    /// The pivot is the first element at which `predicate` holds on the
    /// prefix measure. If it never holds, the pivot is the last element.
    ///
    /// # Errors
    ///
    /// Returns [`FingerTreeError::EmptyStructure`] if the tree is empty.
    pub fn split_tree<P>(&self, mut predicate: P) -> Result<Split<A, M>, FingerTreeError>
    where
        P: FnMut(&M) -> bool,
    {
        let split = self
            .tree
            .split_node(&mut predicate, &M::empty(), Sides::BOTH)
            .ok_or_else(|| FingerTreeError::empty_structure("split_tree"))?;
        Ok(Split {
            left: Self::from_tree(split.left),
            pivot: split.pivot,
            right: Self::from_tree(split.right),
        })
    }

    /// Returns the element at which `predicate` on the prefix measure first
    /// becomes true, or `None` if it never does.
    ///
    /// Nothing is rebuilt.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find<P>(&self, mut predicate: P) -> Option<&A>
    where
        P: FnMut(&M) -> bool,
    {
        if self.is_empty() || !predicate(&self.measure()) {
            return None;
        }
        self.tree
            .lookup(&mut predicate, &M::empty())
            .map(|(_, node)| node.element())
    }

    /// Returns an iterator from first to last element.
    #[must_use]
    pub fn iter(&self) -> FingerTreeIterator<'_, A, M> {
        FingerTreeIterator {
            leaves: Leaves::new(&self.tree, false),
        }
    }

    /// Returns an iterator from last to first element.
    #[must_use]
    pub fn iter_rev(&self) -> FingerTreeReverseIterator<'_, A, M> {
        FingerTreeReverseIterator {
            leaves: Leaves::new(&self.tree, true),
        }
    }

    pub(crate) fn leaves(&self, reverse: bool) -> Leaves<'_, A, M> {
        Leaves::new(&self.tree, reverse)
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

    /// Compares the shapes and elements of two trees.
    ///
    /// Unlike `==`, two trees holding the same elements in differently
    /// balanced shapes are not structurally equal. Shared subtrees are
    /// not visited.
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool
    where
        A: PartialEq,
    {
        self.tree.structurally_equal(&other.tree)
    }
}

impl<A, M> Split<A, M> {
    /// Elements before the pivot.
    #[must_use]
    pub const fn left(&self) -> &FingerTree<A, M> {
        &self.left
    }

    /// The element at which the predicate first held.
    #[must_use]
    pub fn pivot(&self) -> &A {
        self.pivot.element()
    }

    /// Elements after the pivot.
    #[must_use]
    pub const fn right(&self) -> &FingerTree<A, M> {
        &self.right
    }

    /// Returns the left and right trees, discarding the pivot.
    #[must_use]
    pub fn into_sides(self) -> (FingerTree<A, M>, FingerTree<A, M>) {
        (self.left, self.right)
    }
}

impl<A: fmt::Debug, M> fmt::Debug for Split<A, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Split")
            .field("pivot", self.pivot())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<A, M> Default for FingerTree<A, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq + Measured<M>, M: Monoid + Clone> PartialEq for FingerTree<A, M> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl<A: Eq + Measured<M>, M: Monoid + Clone> Eq for FingerTree<A, M> {}

impl<A: fmt::Debug + Measured<M>, M: Monoid + Clone> fmt::Debug for FingerTree<A, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<A: Hash + Measured<M>, M: Monoid + Clone> Hash for FingerTree<A, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut count = 0_usize;
        for element in self {
            element.hash(state);
            count += 1;
        }
        count.hash(state);
    }
}

impl<A: Measured<M>, M: Monoid + Clone> FromIterator<A> for FingerTree<A, M> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let nodes: Vec<NodeRef<A, M>> = iter.into_iter().map(Node::leaf).collect();
        Self::from_tree(Tree::from_nodes(&nodes))
    }
}

impl<'a, A: Measured<M>, M: Monoid + Clone> IntoIterator for &'a FingerTree<A, M> {
    type Item = &'a A;
    type IntoIter = FingerTreeIterator<'a, A, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Add for FingerTree<A, M> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.concat(&other)
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Add for &FingerTree<A, M> {
    type Output = FingerTree<A, M>;

    fn add(self, other: Self) -> FingerTree<A, M> {
        self.concat(other)
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Semigroup for FingerTree<A, M> {
    fn combine(self, other: Self) -> Self {
        self.concat(&other)
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Monoid for FingerTree<A, M> {
    fn empty() -> Self {
        Self::new()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over references to the elements of a [`FingerTree`], first
/// to last.
pub struct FingerTreeIterator<'a, A, M> {
    leaves: Leaves<'a, A, M>,
}

impl<'a, A: Measured<M>, M: Monoid + Clone> Iterator for FingerTreeIterator<'a, A, M> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        self.leaves.next().map(|node| node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.leaves.size_hint()
    }
}

/// An iterator over references to the elements of a [`FingerTree`], last
/// to first.
pub struct FingerTreeReverseIterator<'a, A, M> {
    leaves: Leaves<'a, A, M>,
}

impl<'a, A: Measured<M>, M: Monoid + Clone> Iterator for FingerTreeReverseIterator<'a, A, M> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        self.leaves.next().map(|node| node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.leaves.size_hint()
    }
}
