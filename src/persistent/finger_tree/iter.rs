//! Forward and reverse traversal over the leaves of a tree.
//!
//! Both directions walk an explicit stack of borrowed frames, forcing each
//! spine as it is reached. Neither allocates more than O(depth) frames at
//! a time and neither rebuilds any part of the tree.

use super::node::{Node, NodeRef};
use super::tree::Tree;
use crate::typeclass::{Measured, Monoid};

enum Frame<'a, A, M> {
    Tree(&'a Tree<A, M>),
    Node(&'a NodeRef<A, M>),
}

/// Depth-first walk over leaves in either direction.
pub(crate) struct Leaves<'a, A, M> {
    stack: Vec<Frame<'a, A, M>>,
    reverse: bool,
    remaining: Option<usize>,
}

impl<'a, A, M> Leaves<'a, A, M> {
    pub(crate) fn new(tree: &'a Tree<A, M>, reverse: bool) -> Self {
        Self {
            stack: vec![Frame::Tree(tree)],
            reverse,
            remaining: None,
        }
    }

    /// Records the exact number of leaves so that `size_hint` is precise.
    pub(crate) fn with_len(mut self, length: usize) -> Self {
        self.remaining = Some(length);
        self
    }

    fn push_nodes(&mut self, nodes: &'a [NodeRef<A, M>]) {
        if self.reverse {
            self.stack.extend(nodes.iter().map(Frame::Node));
        } else {
            self.stack.extend(nodes.iter().rev().map(Frame::Node));
        }
    }
}

impl<'a, A: Measured<M>, M: Monoid + Clone> Iterator for Leaves<'a, A, M> {
    type Item = &'a NodeRef<A, M>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Node(node) => {
                    if let Node::Leaf(_) = &**node {
                        if let Some(remaining) = &mut self.remaining {
                            *remaining -= 1;
                        }
                        return Some(node);
                    }
                    self.push_nodes(node.children());
                }
                Frame::Tree(Tree::Empty) => {}
                Frame::Tree(Tree::Single(node)) => self.stack.push(Frame::Node(node)),
                Frame::Tree(Tree::Deep(deep)) => {
                    let (first, last) = if self.reverse {
                        (&deep.left, &deep.right)
                    } else {
                        (&deep.right, &deep.left)
                    };
                    self.push_nodes(first.as_slice());
                    self.stack.push(Frame::Tree(deep.middle.force()));
                    self.push_nodes(last.as_slice());
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None if self.stack.is_empty() => (0, Some(0)),
            None => (0, None),
        }
    }
}
