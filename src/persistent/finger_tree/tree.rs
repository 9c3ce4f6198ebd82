//! The recursive tree shape and its O(1) frontier operations.
//!
//! The middle of a deep tree is a [`Spine`]: the cached measure of the
//! middle subtree plus a shared [`Suspension`] that produces it. Pushing
//! into a full digit, refilling an emptied digit from the middle, or
//! concatenating two deep trees does not rebuild the middle; it records a
//! [`SpineComputation`] instead. The computation only
//! refers to subtrees that are already evaluated, so forcing a spine runs
//! at most one step per level.

use arrayvec::ArrayVec;

use super::concat::concat_with_middle;
use super::node::{Digit, Node, NodeRef};
use crate::control::{Deferred, Suspension};
use crate::persistent::ReferenceCounter;
use crate::typeclass::{Measured, Monoid};

pub(crate) enum Tree<A, M> {
    Empty,
    Single(NodeRef<A, M>),
    Deep(ReferenceCounter<Deep<A, M>>),
}

pub(crate) struct Deep<A, M> {
    pub(crate) measure: M,
    pub(crate) left: Digit<A, M>,
    pub(crate) middle: Spine<A, M>,
    pub(crate) right: Digit<A, M>,
}

impl<A, M> Clone for Tree<A, M> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Single(node) => Self::Single(node.clone()),
            Self::Deep(deep) => Self::Deep(deep.clone()),
        }
    }
}

// =============================================================================
// Spine
// =============================================================================

/// A postponed rebuild of a middle subtree.
pub(crate) enum SpineComputation<A, M> {
    Prepend(NodeRef<A, M>, Tree<A, M>),
    Append(Tree<A, M>, NodeRef<A, M>),
    Concat(Tree<A, M>, ArrayVec<NodeRef<A, M>, 4>, Tree<A, M>),
    Tail(Tree<A, M>),
    Init(Tree<A, M>),
}

impl<A: Measured<M>, M: Monoid + Clone> Deferred<Tree<A, M>> for SpineComputation<A, M> {
    fn evaluate(self) -> Tree<A, M> {
        match self {
            Self::Prepend(node, tree) => tree.prepend_node(node),
            Self::Append(tree, node) => tree.append_node(node),
            Self::Concat(left, nodes, right) => concat_with_middle(&left, &nodes, &right),
            Self::Tail(tree) => tree.view_left().map_or(Tree::Empty, |(_, rest)| rest),
            Self::Init(tree) => tree.view_right().map_or(Tree::Empty, |(rest, _)| rest),
        }
    }
}

type SpineCell<A, M> = Suspension<Tree<A, M>, SpineComputation<A, M>>;

/// The lazily evaluated middle of a deep tree.
pub(crate) struct Spine<A, M> {
    measure: M,
    cell: ReferenceCounter<SpineCell<A, M>>,
}

impl<A, M: Clone> Clone for Spine<A, M> {
    fn clone(&self) -> Self {
        Self {
            measure: self.measure.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<A, M> Spine<A, M> {
    /// Measure of the middle subtree, available without forcing it.
    pub(crate) const fn measure(&self) -> &M {
        &self.measure
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.cell, &other.cell)
    }

    #[cfg(test)]
    pub(crate) fn is_evaluated(&self) -> bool {
        self.cell.is_evaluated()
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Spine<A, M> {
    pub(crate) fn evaluated(tree: Tree<A, M>) -> Self {
        Self {
            measure: tree.measure(),
            cell: ReferenceCounter::new(Suspension::evaluated(tree)),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::evaluated(Tree::Empty)
    }

    pub(crate) fn suspended(measure: M, computation: SpineComputation<A, M>) -> Self {
        Self {
            measure,
            cell: ReferenceCounter::new(Suspension::new(computation)),
        }
    }

    /// Evaluates the middle subtree at most once and returns it.
    pub(crate) fn force(&self) -> &Tree<A, M> {
        self.cell.force()
    }
}

// =============================================================================
// Tree
// =============================================================================

impl<A, M> Tree<A, M> {
    pub(crate) const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Single(left), Self::Single(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Deep(left), Self::Deep(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    pub(crate) fn first_node(&self) -> Option<&NodeRef<A, M>> {
        match self {
            Self::Empty => None,
            Self::Single(node) => Some(node),
            Self::Deep(deep) => Some(deep.left.first()),
        }
    }

    pub(crate) fn last_node(&self) -> Option<&NodeRef<A, M>> {
        match self {
            Self::Empty => None,
            Self::Single(node) => Some(node),
            Self::Deep(deep) => Some(deep.right.last()),
        }
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Tree<A, M> {
    pub(crate) fn measure(&self) -> M {
        match self {
            Self::Empty => M::empty(),
            Self::Single(node) => node.measure(),
            Self::Deep(deep) => deep.measure.clone(),
        }
    }

    pub(crate) fn deep(left: Digit<A, M>, middle: Spine<A, M>, right: Digit<A, M>) -> Self {
        let measure = left
            .measure()
            .combine_ref(middle.measure())
            .combine(right.measure());
        Self::deep_with_measure(measure, left, middle, right)
    }

    pub(crate) fn deep_with_measure(
        measure: M,
        left: Digit<A, M>,
        middle: Spine<A, M>,
        right: Digit<A, M>,
    ) -> Self {
        Self::Deep(ReferenceCounter::new(Deep {
            measure,
            left,
            middle,
            right,
        }))
    }

    /// Builds a tree holding `nodes` in order.
    ///
    /// Up to six nodes are laid out directly across the two digits.
    pub(crate) fn from_nodes(nodes: &[NodeRef<A, M>]) -> Self {
        match nodes.len() {
            0 => Self::Empty,
            1 => Self::Single(nodes[0].clone()),
            2..=6 => {
                let (left, right) = nodes.split_at(nodes.len() / 2);
                Self::deep(Digit::new(left), Spine::empty(), Digit::new(right))
            }
            _ => {
                let (initial, rest) = nodes.split_at(6);
                rest.iter()
                    .fold(Self::from_nodes(initial), |tree, node| {
                        tree.append_node(node.clone())
                    })
            }
        }
    }

    pub(crate) fn prepend_node(&self, node: NodeRef<A, M>) -> Self {
        let deep = match self {
            Self::Empty => return Self::Single(node),
            Self::Single(existing) => {
                return Self::deep(Digit::one(node), Spine::empty(), Digit::one(existing.clone()));
            }
            Self::Deep(deep) => deep,
        };
        let measure = node.measure().combine_ref(&deep.measure);
        if let Some(left) = deep.left.prepend(node.clone()) {
            return Self::deep_with_measure(measure, left, deep.middle.clone(), deep.right.clone());
        }

        let [first, second, third, fourth] = deep.left.as_slice() else {
            unreachable!("a digit that refuses a node holds four nodes");
        };
        let middle = deep.middle.force();
        if middle.is_empty()
            && let Some(right) = deep.right.prepend(fourth.clone())
        {
            let left = Digit::new(&[node, first.clone(), second.clone(), third.clone()]);
            return Self::deep_with_measure(measure, left, deep.middle.clone(), right);
        }

        let packed = Node::node3(second.clone(), third.clone(), fourth.clone());
        let spine = match middle {
            Self::Empty => Spine::evaluated(Self::Single(packed)),
            Self::Single(only) => Spine::evaluated(Self::deep(
                Digit::one(packed),
                Spine::empty(),
                Digit::one(only.clone()),
            )),
            Self::Deep(_) => Spine::suspended(
                packed.measure().combine_ref(deep.middle.measure()),
                SpineComputation::Prepend(packed, middle.clone()),
            ),
        };
        let left = Digit::new(&[node, first.clone()]);
        Self::deep_with_measure(measure, left, spine, deep.right.clone())
    }

    pub(crate) fn append_node(&self, node: NodeRef<A, M>) -> Self {
        let deep = match self {
            Self::Empty => return Self::Single(node),
            Self::Single(existing) => {
                return Self::deep(Digit::one(existing.clone()), Spine::empty(), Digit::one(node));
            }
            Self::Deep(deep) => deep,
        };
        let measure = deep.measure.combine_ref(&node.measure());
        if let Some(right) = deep.right.append(node.clone()) {
            return Self::deep_with_measure(measure, deep.left.clone(), deep.middle.clone(), right);
        }

        let [first, second, third, fourth] = deep.right.as_slice() else {
            unreachable!("a digit that refuses a node holds four nodes");
        };
        let middle = deep.middle.force();
        if middle.is_empty()
            && let Some(left) = deep.left.append(first.clone())
        {
            let right = Digit::new(&[second.clone(), third.clone(), fourth.clone(), node]);
            return Self::deep_with_measure(measure, left, deep.middle.clone(), right);
        }

        let packed = Node::node3(first.clone(), second.clone(), third.clone());
        let spine = match middle {
            Self::Empty => Spine::evaluated(Self::Single(packed)),
            Self::Single(only) => Spine::evaluated(Self::deep(
                Digit::one(only.clone()),
                Spine::empty(),
                Digit::one(packed),
            )),
            Self::Deep(_) => Spine::suspended(
                deep.middle.measure().combine_ref(&packed.measure()),
                SpineComputation::Append(middle.clone(), packed),
            ),
        };
        let right = Digit::new(&[fourth.clone(), node]);
        Self::deep_with_measure(measure, deep.left.clone(), spine, right)
    }

    /// Splits off the first node.
    pub(crate) fn view_left(&self) -> Option<(NodeRef<A, M>, Self)> {
        match self {
            Self::Empty => None,
            Self::Single(node) => Some((node.clone(), Self::Empty)),
            Self::Deep(deep) => {
                let rest = Self::deep_left(&deep.left.as_slice()[1..], &deep.middle, &deep.right);
                Some((deep.left.first().clone(), rest))
            }
        }
    }

    /// Splits off the last node.
    pub(crate) fn view_right(&self) -> Option<(Self, NodeRef<A, M>)> {
        match self {
            Self::Empty => None,
            Self::Single(node) => Some((Self::Empty, node.clone())),
            Self::Deep(deep) => {
                let nodes = deep.right.as_slice();
                let rest = Self::deep_right(&deep.left, &deep.middle, &nodes[..nodes.len() - 1]);
                Some((rest, deep.right.last().clone()))
            }
        }
    }

    /// A deep tree whose left digit may be empty.
    ///
    /// An empty left digit is refilled from the first branch of the middle,
    /// or the right digit becomes the whole tree if the middle is empty.
    /// Only the top level of the middle is forced; removing the branch
    /// from a middle whose own left digit empties is suspended.
    pub(crate) fn deep_left(left: &[NodeRef<A, M>], middle: &Spine<A, M>, right: &Digit<A, M>) -> Self {
        if let Some(left) = Digit::try_new(left) {
            return Self::deep(left, middle.clone(), right.clone());
        }
        let forced = middle.force();
        match forced {
            Self::Empty => Self::from_nodes(right.as_slice()),
            Self::Single(branch) => Self::deep(Digit::from_branch(branch), Spine::empty(), right.clone()),
            Self::Deep(inner) => {
                let remaining = &inner.left.as_slice()[1..];
                let spine = match Digit::try_new(remaining) {
                    Some(digit) => Spine::evaluated(Self::deep(digit, inner.middle.clone(), inner.right.clone())),
                    None => Spine::suspended(
                        inner.middle.measure().combine_ref(&inner.right.measure()),
                        SpineComputation::Tail(forced.clone()),
                    ),
                };
                Self::deep(Digit::from_branch(inner.left.first()), spine, right.clone())
            }
        }
    }

    /// A deep tree whose right digit may be empty.
    pub(crate) fn deep_right(left: &Digit<A, M>, middle: &Spine<A, M>, right: &[NodeRef<A, M>]) -> Self {
        if let Some(right) = Digit::try_new(right) {
            return Self::deep(left.clone(), middle.clone(), right);
        }
        let forced = middle.force();
        match forced {
            Self::Empty => Self::from_nodes(left.as_slice()),
            Self::Single(branch) => Self::deep(left.clone(), Spine::empty(), Digit::from_branch(branch)),
            Self::Deep(inner) => {
                let nodes = inner.right.as_slice();
                let remaining = &nodes[..nodes.len() - 1];
                let spine = match Digit::try_new(remaining) {
                    Some(digit) => Spine::evaluated(Self::deep(inner.left.clone(), inner.middle.clone(), digit)),
                    None => Spine::suspended(
                        inner.left.measure().combine_ref(inner.middle.measure()),
                        SpineComputation::Init(forced.clone()),
                    ),
                };
                Self::deep(left.clone(), spine, Digit::from_branch(inner.right.last()))
            }
        }
    }

    /// Compares shape and elements, ignoring the cached measures.
    ///
    /// Shared subtrees compare equal without being visited.
    pub(crate) fn structurally_equal(&self, other: &Self) -> bool
    where
        A: PartialEq,
    {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Single(left), Self::Single(right)) => nodes_equal(left, right),
            (Self::Deep(left), Self::Deep(right)) => {
                ReferenceCounter::ptr_eq(left, right)
                    || (digits_equal(&left.left, &right.left)
                        && digits_equal(&left.right, &right.right)
                        && (left.middle.ptr_eq(&right.middle)
                            || left.middle.force().structurally_equal(right.middle.force())))
            }
            _ => false,
        }
    }
}

fn digits_equal<A: PartialEq, M>(left: &Digit<A, M>, right: &Digit<A, M>) -> bool {
    left.len() == right.len()
        && left
            .as_slice()
            .iter()
            .zip(right.as_slice())
            .all(|(left, right)| nodes_equal(left, right))
}

fn nodes_equal<A: PartialEq, M>(left: &NodeRef<A, M>, right: &NodeRef<A, M>) -> bool {
    if ReferenceCounter::ptr_eq(left, right) {
        return true;
    }
    match (&**left, &**right) {
        (Node::Leaf(left), Node::Leaf(right)) => left == right,
        (Node::Node2 { children: left, .. }, Node::Node2 { children: right, .. }) => {
            left.iter().zip(right).all(|(left, right)| nodes_equal(left, right))
        }
        (Node::Node3 { children: left, .. }, Node::Node3 { children: right, .. }) => {
            left.iter().zip(right).all(|(left, right)| nodes_equal(left, right))
        }
        _ => false,
    }
}
