//! Splitting at the point where a monotone predicate on the prefix
//! measure first becomes true.

use super::node::NodeRef;
use super::tree::{Spine, Tree};
use crate::typeclass::{Measured, Monoid};

/// Which sides of a split the caller will use.
///
/// Unused sides are never rebuilt, so `take_until` and `drop_until` only
/// pay for the half they return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sides {
    pub(crate) left: bool,
    pub(crate) right: bool,
}

impl Sides {
    pub(crate) const BOTH: Self = Self {
        left: true,
        right: true,
    };
    pub(crate) const LEFT: Self = Self {
        left: true,
        right: false,
    };
    pub(crate) const RIGHT: Self = Self {
        left: false,
        right: true,
    };
}

/// The result of splitting a non-empty tree around its pivot node.
pub(crate) struct SplitNode<A, M> {
    pub(crate) left: Tree<A, M>,
    /// Measure of everything before the pivot, including the caller's prefix.
    pub(crate) prefix: M,
    pub(crate) pivot: NodeRef<A, M>,
    pub(crate) right: Tree<A, M>,
}

/// Index of the first node at which `predicate(prefix ⊕ nodes[..=i])`
/// holds, paired with the measure accumulated before it.
///
/// Falls back to the last node when the predicate never holds.
fn search_nodes<A, M, P>(nodes: &[NodeRef<A, M>], predicate: &mut P, prefix: &M) -> (usize, M)
where
    A: Measured<M>,
    M: Monoid + Clone,
    P: FnMut(&M) -> bool,
{
    debug_assert!(!nodes.is_empty());
    let last = nodes.len() - 1;
    let mut accumulated = prefix.clone();
    for (index, node) in nodes[..last].iter().enumerate() {
        let next = accumulated.combine_ref(&node.measure());
        if predicate(&next) {
            return (index, accumulated);
        }
        accumulated = next;
    }
    (last, accumulated)
}

impl<A: Measured<M>, M: Monoid + Clone> Tree<A, M> {
    /// Splits a non-empty tree into `left`, `pivot` and `right`.
    ///
    /// If the predicate is monotone and false on `prefix` but true on
    /// `prefix ⊕ self.measure()`, the pivot is the first node whose
    /// inclusion makes it true. Otherwise the pivot is the last node.
    pub(crate) fn split_node<P>(&self, predicate: &mut P, prefix: &M, sides: Sides) -> Option<SplitNode<A, M>>
    where
        P: FnMut(&M) -> bool,
    {
        let deep = match self {
            Self::Empty => return None,
            Self::Single(node) => {
                return Some(SplitNode {
                    left: Self::Empty,
                    prefix: prefix.clone(),
                    pivot: node.clone(),
                    right: Self::Empty,
                });
            }
            Self::Deep(deep) => deep,
        };

        let through_left = prefix.combine_ref(&deep.left.measure());
        if predicate(&through_left) {
            let nodes = deep.left.as_slice();
            let (index, before) = search_nodes(nodes, predicate, prefix);
            return Some(SplitNode {
                left: if sides.left { Self::from_nodes(&nodes[..index]) } else { Self::Empty },
                prefix: before,
                pivot: nodes[index].clone(),
                right: if sides.right {
                    Self::deep_left(&nodes[index + 1..], &deep.middle, &deep.right)
                } else {
                    Self::Empty
                },
            });
        }

        let through_middle = through_left.combine_ref(deep.middle.measure());
        if predicate(&through_middle) {
            let inner = deep
                .middle
                .force()
                .split_node(predicate, &through_left, sides)?;
            let children = inner.pivot.children();
            let (index, before) = search_nodes(children, predicate, &inner.prefix);
            return Some(SplitNode {
                left: if sides.left {
                    Self::deep_right(&deep.left, &Spine::evaluated(inner.left), &children[..index])
                } else {
                    Self::Empty
                },
                prefix: before,
                pivot: children[index].clone(),
                right: if sides.right {
                    Self::deep_left(&children[index + 1..], &Spine::evaluated(inner.right), &deep.right)
                } else {
                    Self::Empty
                },
            });
        }

        let nodes = deep.right.as_slice();
        let (index, before) = search_nodes(nodes, predicate, &through_middle);
        Some(SplitNode {
            left: if sides.left {
                Self::deep_right(&deep.left, &deep.middle, &nodes[..index])
            } else {
                Self::Empty
            },
            prefix: before,
            pivot: nodes[index].clone(),
            right: if sides.right { Self::from_nodes(&nodes[index + 1..]) } else { Self::Empty },
        })
    }

    /// Finds the node where the predicate first holds without building
    /// either side.
    ///
    /// Same preconditions and fallback as [`Tree::split_node`].
    pub(crate) fn lookup<P>(&self, predicate: &mut P, prefix: &M) -> Option<(M, &NodeRef<A, M>)>
    where
        P: FnMut(&M) -> bool,
    {
        let deep = match self {
            Self::Empty => return None,
            Self::Single(node) => return Some((prefix.clone(), node)),
            Self::Deep(deep) => deep,
        };

        let through_left = prefix.combine_ref(&deep.left.measure());
        if predicate(&through_left) {
            let nodes = deep.left.as_slice();
            let (index, before) = search_nodes(nodes, predicate, prefix);
            return Some((before, &nodes[index]));
        }

        let through_middle = through_left.combine_ref(deep.middle.measure());
        if predicate(&through_middle) {
            let (inner_prefix, branch) = deep.middle.force().lookup(predicate, &through_left)?;
            let children = branch.children();
            let (index, before) = search_nodes(children, predicate, &inner_prefix);
            return Some((before, &children[index]));
        }

        let nodes = deep.right.as_slice();
        let (index, before) = search_nodes(nodes, predicate, &through_middle);
        Some((before, &nodes[index]))
    }
}
