//! Nodes and digits.
//!
//! A finger tree stores its elements in `Leaf` nodes. One level down the
//! spine every entry is a `Node2` or `Node3` branch whose children sit one
//! level closer to the leaves, so the leaves under a branch at depth `d`
//! are all exactly `d` levels below it. Branches cache the combined
//! measure of their children.

use arrayvec::ArrayVec;

use crate::persistent::ReferenceCounter;
use crate::typeclass::{Measured, Monoid};

pub(crate) type NodeRef<A, M> = ReferenceCounter<Node<A, M>>;

pub(crate) enum Node<A, M> {
    Leaf(A),
    Node2 {
        measure: M,
        children: [NodeRef<A, M>; 2],
    },
    Node3 {
        measure: M,
        children: [NodeRef<A, M>; 3],
    },
}

impl<A, M> Node<A, M> {
    pub(crate) fn leaf(element: A) -> NodeRef<A, M> {
        ReferenceCounter::new(Self::Leaf(element))
    }

    /// The element of a leaf.
    ///
    /// Elements are only ever read from depth zero, where every node is a
    /// leaf.
    pub(crate) fn element(&self) -> &A {
        match self {
            Self::Leaf(element) => element,
            Self::Node2 { .. } | Self::Node3 { .. } => {
                unreachable!("element requested from a branch node")
            }
        }
    }

    /// Children of a branch; empty for a leaf.
    pub(crate) fn children(&self) -> &[NodeRef<A, M>] {
        match self {
            Self::Leaf(_) => &[],
            Self::Node2 { children, .. } => children.as_slice(),
            Self::Node3 { children, .. } => children.as_slice(),
        }
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Node<A, M> {
    pub(crate) fn measure(&self) -> M {
        match self {
            Self::Leaf(element) => element.measure(),
            Self::Node2 { measure, .. } | Self::Node3 { measure, .. } => measure.clone(),
        }
    }

    pub(crate) fn node2(first: NodeRef<A, M>, second: NodeRef<A, M>) -> NodeRef<A, M> {
        let measure = first.measure().combine(second.measure());
        ReferenceCounter::new(Self::Node2 {
            measure,
            children: [first, second],
        })
    }

    pub(crate) fn node3(
        first: NodeRef<A, M>,
        second: NodeRef<A, M>,
        third: NodeRef<A, M>,
    ) -> NodeRef<A, M> {
        let measure = first
            .measure()
            .combine(second.measure())
            .combine(third.measure());
        ReferenceCounter::new(Self::Node3 {
            measure,
            children: [first, second, third],
        })
    }

    /// Packs two or three siblings into one branch.
    pub(crate) fn branch(nodes: &[NodeRef<A, M>]) -> NodeRef<A, M> {
        match nodes {
            [first, second] => Self::node2(first.clone(), second.clone()),
            [first, second, third] => Self::node3(first.clone(), second.clone(), third.clone()),
            _ => unreachable!("a branch holds two or three children, got {}", nodes.len()),
        }
    }
}

/// Combined measure of a run of sibling nodes.
pub(crate) fn measure_nodes<A: Measured<M>, M: Monoid + Clone>(nodes: &[NodeRef<A, M>]) -> M {
    M::combine_all(nodes.iter().map(|node| node.measure()))
}

// =============================================================================
// Digit
// =============================================================================

/// One to four nodes at either end of a deep tree.
pub(crate) struct Digit<A, M> {
    nodes: ArrayVec<NodeRef<A, M>, 4>,
}

impl<A, M> Clone for Digit<A, M> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<A, M> Digit<A, M> {
    pub(crate) fn one(node: NodeRef<A, M>) -> Self {
        let mut nodes = ArrayVec::new();
        nodes.push(node);
        Self { nodes }
    }

    /// Builds a digit from one to four nodes.
    pub(crate) fn new(nodes: &[NodeRef<A, M>]) -> Self {
        debug_assert!(
            (1..=4).contains(&nodes.len()),
            "a digit holds one to four nodes, got {}",
            nodes.len()
        );
        Self {
            nodes: nodes.iter().cloned().collect(),
        }
    }

    /// Builds a digit, or returns `None` when `nodes` is empty.
    pub(crate) fn try_new(nodes: &[NodeRef<A, M>]) -> Option<Self> {
        (!nodes.is_empty()).then(|| Self::new(nodes))
    }

    /// The children of a branch as a digit.
    pub(crate) fn from_branch(node: &Node<A, M>) -> Self {
        Self::new(node.children())
    }

    pub(crate) fn as_slice(&self) -> &[NodeRef<A, M>] {
        &self.nodes
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn first(&self) -> &NodeRef<A, M> {
        &self.nodes[0]
    }

    pub(crate) fn last(&self) -> &NodeRef<A, M> {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Prepends a node, or returns `None` if the digit is full.
    pub(crate) fn prepend(&self, node: NodeRef<A, M>) -> Option<Self> {
        if self.nodes.is_full() {
            return None;
        }
        let mut nodes = ArrayVec::new();
        nodes.push(node);
        nodes.extend(self.nodes.iter().cloned());
        Some(Self { nodes })
    }

    /// Appends a node, or returns `None` if the digit is full.
    pub(crate) fn append(&self, node: NodeRef<A, M>) -> Option<Self> {
        if self.nodes.is_full() {
            return None;
        }
        let mut nodes = self.nodes.clone();
        nodes.push(node);
        Some(Self { nodes })
    }
}

impl<A: Measured<M>, M: Monoid + Clone> Digit<A, M> {
    pub(crate) fn measure(&self) -> M {
        measure_nodes(&self.nodes)
    }
}
